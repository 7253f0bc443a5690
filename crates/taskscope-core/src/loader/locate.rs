//! Source positions for plays, blocks and tasks.
//!
//! `serde_yaml` does not report where a value came from, so positions are
//! recovered from the source text. The loader visits entries in document
//! order and the [`Locator`] scans forward from the last match for the list
//! entry that opens with the same first key and scalar value. Entries whose
//! first value is not a scalar only match the next mapping entry. Block and
//! flow (`- {key: value}`) entries are both recognized.

use serde_yaml::{Mapping, Value};

pub(crate) struct Locator<'s> {
    origin: String,
    lines: Vec<&'s str>,
    cursor: usize,
}

impl<'s> Locator<'s> {
    pub(crate) fn new(origin: impl Into<String>, source: &'s str) -> Self {
        Self {
            origin: origin.into(),
            lines: source.lines().collect(),
            cursor: 0,
        }
    }

    /// `<origin>:<line>` of the list entry holding `mapping`, or the bare
    /// origin when it cannot be found.
    pub(crate) fn locate(&mut self, mapping: &Mapping) -> String {
        let Some((key, value)) = mapping.iter().next() else {
            return self.origin.clone();
        };
        let Some(key) = key.as_str() else {
            return self.origin.clone();
        };
        let scalar = scalar_text(value);

        let found = scalar
            .as_deref()
            .and_then(|text| self.find(key, text))
            .or_else(|| self.next_entry(key));

        match found {
            Some(index) => {
                self.cursor = index + 1;
                format!("{}:{}", self.origin, index + 1)
            }
            None => self.origin.clone(),
        }
    }

    fn find(&self, key: &str, scalar: &str) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(self.cursor)
            .find(|(_, line)| {
                entry_head(line).map_or(false, |(k, value)| k == key && unquote(value) == scalar)
            })
            .map(|(index, _)| index)
    }

    // Only the next mapping entry may match, so a miss never borrows a
    // sibling's line.
    fn next_entry(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(self.cursor)
            .find_map(|(index, line)| entry_head(line).map(|(k, _)| (index, k)))
            .and_then(|(index, k)| (k == key).then_some(index))
    }
}

/// First key and raw value of a line opening a mapping list entry, either
/// `- key: value` or a flow mapping `- {key: value, ...}`.
fn entry_head(line: &str) -> Option<(&str, &str)> {
    let entry = line.trim_start().strip_prefix('-')?.trim_start();
    let (entry, flow) = match entry.strip_prefix('{') {
        Some(inner) => (inner.trim_start(), true),
        None => (entry, false),
    };

    let (key, rest) = entry.split_once(':')?;
    let closes_flow = flow && rest.starts_with([',', '}']);
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace) || closes_flow) {
        return None;
    }
    let key = unquote(key.trim());
    if key.is_empty() {
        return None;
    }

    let mut value = rest.trim();
    if flow {
        value = value.split([',', '}']).next().unwrap_or_default().trim();
    }
    Some((key, value))
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Text of a scalar YAML value; `None` for mappings, sequences and null.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
