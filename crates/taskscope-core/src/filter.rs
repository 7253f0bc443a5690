//! Tag selection (`--tags` / `--skip-tags`) applied to compiled blocks.
//!
//! Selection runs before traversal: every top-level block of a play is
//! filtered with [`Block::filter`] and dropped when [`Block::has_tasks`]
//! reports nothing left. Nested blocks are pruned the same way at their own
//! level.
//!
//! Special tags:
//!
//! - `all` (selected by default) matches every task not tagged `never`
//! - `tagged` / `untagged` match tasks with or without tags
//! - `always` runs unless skipped explicitly
//! - `never` runs only when one of its other tags is selected explicitly

use log::trace;

use crate::{
    models::{Block, BlockItem, Play, Task},
    tags::{self, TagSet},
};

const ALL: &str = "all";
const ALWAYS: &str = "always";
const NEVER: &str = "never";
const TAGGED: &str = "tagged";
const UNTAGGED: &str = "untagged";

/// Inclusion predicate built from the requested and skipped tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelection {
    only: TagSet,
    skip: TagSet,
}

impl Default for TagSelection {
    fn default() -> Self {
        Self {
            only: TagSet::from([ALL.to_string()]),
            skip: TagSet::new(),
        }
    }
}

impl TagSelection {
    /// Build a selection from raw, possibly comma separated, arguments.
    ///
    /// An empty `only` list selects `all`.
    ///
    /// ```rust
    /// use taskscope_core::{filter::TagSelection, tags::TagSet};
    ///
    /// let selection = TagSelection::new(["web"], ["slow"]);
    /// let tags = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<TagSet>();
    ///
    /// assert!(selection.should_run(&tags(&["web"])));
    /// assert!(!selection.should_run(&tags(&["web", "slow"])));
    /// assert!(!selection.should_run(&tags(&[])));
    /// ```
    pub fn new<I, J, S, T>(only: I, skip: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut only = tags::split_tags(only);
        if only.is_empty() {
            only.insert(ALL.to_string());
        }
        Self {
            only,
            skip: tags::split_tags(skip),
        }
    }

    /// Whether a task with these effective tags is selected.
    pub fn should_run(&self, effective: &TagSet) -> bool {
        let untagged;
        let tags = if effective.is_empty() {
            untagged = TagSet::from([UNTAGGED.to_string()]);
            &untagged
        } else {
            effective
        };
        let is_tagged = !effective.is_empty();
        let has = |tag: &str| tags.contains(tag);

        let selected = has(ALWAYS)
            || (self.only.contains(ALL) && !has(NEVER))
            || !tags.is_disjoint(&self.only)
            || (self.only.contains(TAGGED) && is_tagged && !has(NEVER));
        if !selected {
            return false;
        }

        if self.skip.contains(ALL) {
            has(ALWAYS) && !self.skip.contains(ALWAYS)
        } else {
            tags.is_disjoint(&self.skip) && !(self.skip.contains(TAGGED) && is_tagged)
        }
    }

    fn keeps(&self, task: &Task, inherited: &TagSet) -> bool {
        task.implicit || self.should_run(&tags::union(inherited, &task.tags))
    }
}

impl Block {
    /// Copy of this block holding only the selected tasks.
    ///
    /// `inherited` carries the tags of the play and of every enclosing block.
    /// Implicit tasks are always kept. Nested blocks left empty are removed,
    /// so an emptied subtree leaves no trace at its own level.
    pub fn filter(&self, selection: &TagSelection, inherited: &TagSet) -> Block {
        let inherited = tags::union(inherited, &self.tags);
        let items = self
            .items
            .iter()
            .filter_map(|item| match item {
                BlockItem::Task(task) if selection.keeps(task, &inherited) => {
                    Some(BlockItem::Task(task.clone()))
                }
                BlockItem::Task(task) => {
                    trace!("Tag selection skips task '{}'", task.name());
                    None
                }
                BlockItem::Block(block) => {
                    let filtered = block.filter(selection, &inherited);
                    filtered.has_tasks().then_some(BlockItem::Block(filtered))
                }
            })
            .collect();

        Block {
            name: self.name.clone(),
            tags: self.tags.clone(),
            items,
        }
    }
}

impl Play {
    /// Compiled blocks that still hold tasks after tag selection.
    pub fn filtered_blocks(&self, selection: &TagSelection) -> Vec<Block> {
        self.compile()
            .iter()
            .map(|block| block.filter(selection, &self.tags))
            .filter(Block::has_tasks)
            .collect()
    }
}
