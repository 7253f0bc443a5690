//! Tag sets and tag aggregation.
//!
//! Tags are kept in a [`TagSet`], an ordered set, so every listing emits them
//! deduplicated and lexicographically sorted without a separate sort step.

use std::collections::BTreeSet;

/// Ordered, deduplicated set of tags.
pub type TagSet = BTreeSet<String>;

/// Union of two tag layers, e.g. inherited tags and a task's own tags.
pub fn union(inherited: &TagSet, own: &TagSet) -> TagSet {
    inherited.union(own).cloned().collect()
}

/// Split raw tag arguments on commas, trimming whitespace and dropping empty
/// entries.
///
/// ```rust
/// use taskscope_core::tags::split_tags;
///
/// let tags = split_tags(["web, db", "web", " "]);
/// assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["db", "web"]);
/// ```
pub fn split_tags<I, S>(values: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Accumulates every tag seen while listing one play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAggregator {
    seen: TagSet,
}

impl TagAggregator {
    /// Start from the play's declared tags.
    pub fn new(play_tags: &TagSet) -> Self {
        Self {
            seen: play_tags.clone(),
        }
    }

    /// Record a listed task's effective tags.
    pub fn observe(&mut self, tags: &TagSet) {
        self.seen.extend(tags.iter().cloned());
    }

    /// Sorted list of all tags seen so far.
    pub fn snapshot(&self) -> Vec<String> {
        self.seen.iter().cloned().collect()
    }
}
