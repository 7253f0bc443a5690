//! Playbook loading.
//!
//! Compiles a YAML playbook into the [`Playbook`] model. Only what listing
//! needs is read: host patterns, names, tags, task actions and the block
//! structure. Everything else in a play or task (vars, conditions, module
//! arguments) is ignored.
//!
//! ```yaml
//! - hosts: webservers
//!   tags: [web]
//!   tasks:
//!     - name: Install nginx
//!       apt: name=nginx
//!     - block:
//!         - template: src=nginx.conf.j2 dest=/etc/nginx/nginx.conf
//!       tags: config
//! ```
//!
//! Consecutive plain tasks of a section share one implicit block; every
//! `block:` entry becomes a block of its own.

mod locate;

use std::path::Path;

use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use self::locate::{scalar_text, Locator};
use crate::{
    error::{ListingError, Result, YamlResultExt},
    models::{Block, BlockItem, Play, Playbook, Task},
    tags::{self, TagSet},
};

/// Keys that configure a task rather than name its action.
const TASK_KEYWORDS: &[&str] = &[
    "any_errors_fatal",
    "args",
    "async",
    "become",
    "become_exe",
    "become_flags",
    "become_method",
    "become_user",
    "changed_when",
    "check_mode",
    "collections",
    "connection",
    "debugger",
    "delay",
    "delegate_facts",
    "delegate_to",
    "diff",
    "environment",
    "failed_when",
    "ignore_errors",
    "ignore_unreachable",
    "listen",
    "loop",
    "loop_control",
    "module_defaults",
    "name",
    "no_log",
    "notify",
    "poll",
    "register",
    "retries",
    "run_once",
    "tags",
    "throttle",
    "timeout",
    "until",
    "vars",
    "when",
];

/// Read and compile the playbook at `path`.
///
/// # Errors
///
/// Returns `ListingError::FileSystem` if the file cannot be read or its
/// directory cannot be resolved, and `ListingError::Parse` if it is not a
/// valid playbook.
pub fn load_playbook(path: &Path) -> Result<Playbook> {
    let source =
        std::fs::read_to_string(path).map_err(|e| ListingError::file_system(path, e))?;
    let origin = std::fs::canonicalize(path).map_err(|e| ListingError::file_system(path, e))?;
    // The directory holding the path as given, not the target of a link.
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let directory =
        std::fs::canonicalize(parent).map_err(|e| ListingError::file_system(parent, e))?;

    debug!("Loading playbook {}", path.display());
    let plays = parse_plays(&source, path, &origin.to_string_lossy())?;

    Ok(Playbook {
        path: path.to_path_buf(),
        directory,
        plays,
    })
}

/// Compile playbook source text.
///
/// `path` names the file in error messages; `origin` prefixes every recorded
/// source location.
///
/// # Errors
///
/// Returns `ListingError::Parse` if the text is not a list of plays, a play
/// has no `hosts`, or a task has no action.
pub fn parse_plays(source: &str, path: &Path, origin: &str) -> Result<Vec<Play>> {
    let document: Value = serde_yaml::from_str(source).parse_context(path)?;
    let entries = match document {
        Value::Sequence(entries) => entries,
        Value::Null => Vec::new(),
        _ => {
            return Err(ListingError::parse(path).with_message("a playbook must be a list of plays"))
        }
    };

    let mut compiler = Compiler {
        path,
        locator: Locator::new(origin, source),
    };
    let mut plays = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(mapping) = entry.as_mapping() else {
            return Err(ListingError::parse(path)
                .with_message(format!("play #{} is not a mapping", index + 1)));
        };
        if mapping.contains_key("import_playbook") {
            warn!(
                "{}: play #{} imports another playbook, which is not listed",
                path.display(),
                index + 1
            );
            continue;
        }
        plays.push(compiler.play(mapping, index + 1)?);
    }
    Ok(plays)
}

struct Compiler<'a, 's> {
    path: &'a Path,
    locator: Locator<'s>,
}

impl Compiler<'_, '_> {
    fn error(&self, message: impl Into<String>) -> ListingError {
        ListingError::parse(self.path).with_message(message)
    }

    // Keys are visited in document order so located positions only move
    // forward through the file.
    fn play(&mut self, mapping: &Mapping, number: usize) -> Result<Play> {
        let mut play = Play {
            path: Some(self.locator.locate(mapping)),
            ..Default::default()
        };
        let mut name = None;

        for (key, value) in mapping {
            match key.as_str() {
                Some("hosts") => play.hosts = string_list(value),
                Some("name") => name = scalar_text(value),
                Some("tags") => play.tags = tag_set(value),
                Some("pre_tasks") => play.pre_tasks = self.section(value)?,
                Some("tasks") => play.tasks = self.section(value)?,
                Some("post_tasks") => play.post_tasks = self.section(value)?,
                _ => {}
            }
        }

        if play.hosts.is_empty() {
            return Err(self.error(format!("play #{number} has no 'hosts'")));
        }
        play.name = name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| play.pattern());
        debug!(
            "Compiled play #{number} '{}' with {} task blocks",
            play.name,
            play.pre_tasks.len() + play.tasks.len() + play.post_tasks.len()
        );
        Ok(play)
    }

    fn section(&mut self, value: &Value) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut pending = Block::new();

        for item in self.items(value)? {
            match item {
                BlockItem::Block(block) => {
                    if pending.has_tasks() {
                        blocks.push(std::mem::take(&mut pending));
                    }
                    blocks.push(block);
                }
                task @ BlockItem::Task(_) => pending.items.push(task),
            }
        }
        if pending.has_tasks() {
            blocks.push(pending);
        }
        Ok(blocks)
    }

    fn items(&mut self, value: &Value) -> Result<Vec<BlockItem>> {
        let entries = match value {
            Value::Sequence(entries) => entries,
            Value::Null => return Ok(Vec::new()),
            _ => return Err(self.error("a task list must be a sequence")),
        };

        entries
            .iter()
            .map(|entry| {
                let mapping = entry
                    .as_mapping()
                    .ok_or_else(|| self.error("a task entry must be a mapping"))?;
                if mapping.contains_key("block") {
                    self.block(mapping).map(BlockItem::Block)
                } else {
                    self.task(mapping).map(BlockItem::Task)
                }
            })
            .collect()
    }

    fn block(&mut self, mapping: &Mapping) -> Result<Block> {
        self.locator.locate(mapping);
        let mut block = Block::new();

        for (key, value) in mapping {
            match key.as_str() {
                Some("name") => block.name = scalar_text(value),
                Some("tags") => block.tags = tag_set(value),
                Some("block") => block.items = self.items(value)?,
                // Error-handling sections are not listed, but they are
                // compiled so later positions resolve past them.
                Some("rescue" | "always") => {
                    self.items(value)?;
                }
                _ => {}
            }
        }
        Ok(block)
    }

    fn task(&mut self, mapping: &Mapping) -> Result<Task> {
        let path = self.locator.locate(mapping);
        let action = action_of(mapping).ok_or_else(|| {
            let name = mapping
                .get("name")
                .and_then(scalar_text)
                .unwrap_or_default();
            self.error(format!("no action detected in task '{name}'"))
        })?;

        let mut task = Task::new(action).with_path(path);
        task.name = mapping.get("name").and_then(scalar_text);
        if let Some(value) = mapping.get("tags") {
            task.tags = tag_set(value);
        }
        Ok(task)
    }
}

/// Action named by a task entry: the module of `action`/`local_action`, or
/// else the first key that is not a task keyword.
fn action_of(mapping: &Mapping) -> Option<String> {
    for key in ["action", "local_action"] {
        match mapping.get(key) {
            Some(Value::Mapping(args)) => return args.get("module").and_then(scalar_text),
            Some(value) => {
                return scalar_text(value)
                    .and_then(|text| text.split_whitespace().next().map(String::from))
            }
            None => {}
        }
    }

    mapping
        .keys()
        .filter_map(Value::as_str)
        .find(|key| !TASK_KEYWORDS.contains(key) && !key.starts_with("with_"))
        .map(String::from)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other)
            .map(|text| {
                text.split(',')
                    .map(str::trim)
                    .filter(|host| !host.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn tag_set(value: &Value) -> TagSet {
    match value {
        Value::Sequence(items) => tags::split_tags(items.iter().filter_map(scalar_text)),
        other => tags::split_tags(scalar_text(other)),
    }
}
