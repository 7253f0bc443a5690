//! Block and task model definitions.

use crate::tags::TagSet;

/// Action identifier of control-only tasks.
pub const CONTROL_ACTION: &str = "meta";

/// A single unit of work; the leaf of a block tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    /// Optional display name
    pub name: Option<String>,

    /// Module or action identifier (`debug`, `copy`, `meta`, ...)
    pub action: String,

    /// Tags declared directly on the task
    pub tags: TagSet,

    /// Source location as `<file>:<line>`, when known
    pub path: Option<String>,

    /// Whether the task was generated during compilation rather than written
    /// by the playbook author
    pub implicit: bool,
}

impl Task {
    /// Create an unnamed, untagged task for the given action.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Default::default()
        }
    }

    /// Set the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
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

    /// Set the source location.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Mark the task as generated by compilation.
    pub fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    /// Name used in listings: the declared name, or the action when the name
    /// is missing or empty.
    ///
    /// ```rust
    /// use taskscope_core::models::Task;
    ///
    /// assert_eq!(Task::new("ping").name(), "ping");
    /// assert_eq!(Task::new("ping").with_name("Check hosts").name(), "Check hosts");
    /// assert_eq!(Task::new("ping").with_name("").name(), "ping");
    /// ```
    pub fn name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.action,
        }
    }

    /// Source location, if the loader recorded one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Control-only tasks never show up in listings or tag aggregates.
    pub fn is_control(&self) -> bool {
        self.action == CONTROL_ACTION
    }
}

/// An entry of a block: a leaf task or a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockItem {
    Task(Task),
    Block(Block),
}

impl From<Task> for BlockItem {
    fn from(task: Task) -> Self {
        BlockItem::Task(task)
    }
}

impl From<Block> for BlockItem {
    fn from(block: Block) -> Self {
        BlockItem::Block(block)
    }
}

/// A grouping of tasks and nested blocks that share inherited tags.
///
/// Items keep their declaration order; nesting depth is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Optional block name
    pub name: Option<String>,

    /// Tags declared on the block, inherited by everything inside it
    pub tags: TagSet,

    /// Ordered tasks and nested blocks
    pub items: Vec<BlockItem>,
}

impl Block {
    /// Create an empty, untagged block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the block name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
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

    /// Append a task or nested block.
    pub fn with_item(mut self, item: impl Into<BlockItem>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Block holding the implicit handler flush inserted between play
    /// sections.
    pub fn flush_handlers() -> Self {
        Self::new().with_item(Task::new(CONTROL_ACTION).with_name("flush_handlers").implicit())
    }

    /// Whether any item survived filtering.
    pub fn has_tasks(&self) -> bool {
        !self.items.is_empty()
    }
}
