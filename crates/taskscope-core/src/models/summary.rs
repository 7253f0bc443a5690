//! Listing summary types.
//!
//! These are output-only projections of a traversal. The JSON document is
//! produced from their `Serialize` impls; fields marked `skip` only feed the
//! text report.

use serde::Serialize;

/// One listed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Task name, or its action when unnamed
    pub name: String,
    /// Effective tags, sorted
    pub tags: Vec<String>,
    /// Source location; only present when paths were requested
    pub path: Option<String>,
}

/// One play with the tasks that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaySummary {
    /// Host pattern of the play
    pub hosts: String,
    /// Play name
    pub name: String,
    /// Tags declared on the play, sorted
    pub tags: Vec<String>,
    /// Listed tasks in traversal order
    pub tasks: Vec<TaskSummary>,
    /// Play source location; only present when paths were requested
    #[serde(skip)]
    pub path: Option<String>,
    /// Resolved host names; only present when hosts were requested
    #[serde(skip)]
    pub host_names: Option<Vec<String>>,
    /// Union of play tags and every listed task's tags, sorted
    #[serde(skip)]
    pub task_tags: Vec<String>,
}

/// A whole playbook listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybookSummary {
    /// Playbook path as given
    pub playbook: String,
    /// Canonical directory of the playbook
    pub playbook_dir: String,
    /// Plays in declaration order
    pub plays: Vec<PlaySummary>,
}

impl PlaybookSummary {
    /// Create a summary with no plays yet.
    pub fn new(playbook: impl Into<String>, playbook_dir: impl Into<String>) -> Self {
        Self {
            playbook: playbook.into(),
            playbook_dir: playbook_dir.into(),
            plays: Vec::new(),
        }
    }

    /// Append a play summary.
    pub fn add_play(&mut self, play: PlaySummary) {
        self.plays.push(play);
    }

    /// Total number of listed tasks across all plays.
    pub fn task_count(&self) -> usize {
        self.plays.iter().map(|play| play.tasks.len()).sum()
    }
}
