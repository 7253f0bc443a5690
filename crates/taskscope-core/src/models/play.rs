//! Play and playbook model definitions.

use std::path::PathBuf;

use super::Block;
use crate::tags::TagSet;

/// One play of a playbook, as produced by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Play {
    /// Host patterns the play targets
    pub hosts: Vec<String>,

    /// Play name (defaults to the host pattern)
    pub name: String,

    /// Tags declared on the play, inherited by every task
    pub tags: TagSet,

    /// Source location as `<file>:<line>`, when known
    pub path: Option<String>,

    /// Blocks run before the main task list
    pub pre_tasks: Vec<Block>,

    /// Main task list
    pub tasks: Vec<Block>,

    /// Blocks run after the main task list
    pub post_tasks: Vec<Block>,
}

impl Play {
    /// Create a play targeting the given hosts, named after them.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        Self {
            name: hosts.join(","),
            hosts,
            ..Default::default()
        }
    }

    /// Set the play name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add declared tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Append a block to the main task list.
    pub fn with_block(mut self, block: Block) -> Self {
        self.tasks.push(block);
        self
    }

    /// Host pattern as written, joined with commas.
    pub fn pattern(&self) -> String {
        self.hosts.join(",")
    }

    /// Ordered top-level blocks the play would run.
    ///
    /// Each section is followed by an implicit handler flush, so the result
    /// always holds at least three blocks.
    pub fn compile(&self) -> Vec<Block> {
        let mut blocks =
            Vec::with_capacity(self.pre_tasks.len() + self.tasks.len() + self.post_tasks.len() + 3);
        for section in [&self.pre_tasks, &self.tasks, &self.post_tasks] {
            blocks.extend(section.iter().cloned());
            blocks.push(Block::flush_handlers());
        }
        blocks
    }
}

/// A loaded playbook file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playbook {
    /// Path as given by the user
    pub path: PathBuf,

    /// Canonical directory containing the playbook
    pub directory: PathBuf,

    /// Plays in declaration order
    pub plays: Vec<Play>,
}
