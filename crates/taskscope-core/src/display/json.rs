//! JSON listing with absent fields pruned.

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{error::Result, models::PlaybookSummary};

/// Remove every null-valued field from `value`, at any depth.
///
/// Array elements are kept in place; only object fields are dropped.
/// Pruning an already pruned value changes nothing.
///
/// ```rust
/// use serde_json::json;
/// use taskscope_core::display::prune_nulls;
///
/// let mut value = json!({"name": "ping", "path": null, "nested": [{"path": null}]});
/// prune_nulls(&mut value);
/// assert_eq!(value, json!({"name": "ping", "nested": [{}]}));
/// ```
pub fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, field| !field.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}

/// Serialize `value` and prune it, or log and return `None` when it cannot
/// be represented as JSON.
pub fn to_pruned_value<T: Serialize + ?Sized>(value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(mut value) => {
            prune_nulls(&mut value);
            Some(value)
        }
        Err(e) => {
            warn!("Dropping entry that cannot be serialized: {e}");
            None
        }
    }
}

/// Build the JSON document for one playbook.
///
/// Plays are projected one at a time; a play that fails to serialize is
/// dropped with a warning while the rest of the document is kept.
pub fn to_document(summary: &PlaybookSummary) -> Value {
    let plays = summary
        .plays
        .iter()
        .filter_map(|play| to_pruned_value(play))
        .collect();

    let mut document = Map::new();
    document.insert("playbook".to_string(), Value::from(summary.playbook.as_str()));
    document.insert(
        "playbook_dir".to_string(),
        Value::from(summary.playbook_dir.as_str()),
    );
    document.insert("plays".to_string(), Value::Array(plays));
    Value::Object(document)
}

/// Render one playbook as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns `ListingError::Serialization` if the document cannot be written.
pub fn render_json(summary: &PlaybookSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_document(summary))?)
}
