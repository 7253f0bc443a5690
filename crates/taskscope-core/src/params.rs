//! Parameter structures for listing operations
//!
//! These structures are free of CLI framework derives so that the command
//! line (or any other front end) converts its own argument types into them:
//!
//! ```text
//! CLI Args (clap) ──From──▶ Core Params ──▶ handlers
//! ```

use std::path::PathBuf;

/// Which parts of a listing were requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// List task names and tags
    pub list_tasks: bool,
    /// List tasks with their source locations
    pub list_tasks_with_path: bool,
    /// Emit the listing as JSON instead of text
    pub list_tasks_json: bool,
    /// Add the aggregate `TASK TAGS` line to each play
    pub list_tags: bool,
    /// Add the resolved hosts to each play
    pub list_hosts: bool,
}

impl ListingOptions {
    /// Whether task lines (or JSON task entries) are produced.
    pub fn lists_tasks(&self) -> bool {
        self.list_tasks || self.list_tasks_with_path || self.list_tasks_json
    }

    /// Whether source locations are reported.
    pub fn reports_paths(&self) -> bool {
        self.list_tasks_with_path
    }

    /// Whether the output is a JSON document.
    pub fn is_json(&self) -> bool {
        self.list_tasks_json
    }

    /// Whether any listing mode was selected at all.
    pub fn any(&self) -> bool {
        self.lists_tasks() || self.list_tags || self.list_hosts
    }

    /// Fall back to a plain task listing when nothing was selected.
    ///
    /// ```rust
    /// use taskscope_core::params::ListingOptions;
    ///
    /// assert!(ListingOptions::default().or_list_tasks().list_tasks);
    ///
    /// let tags_only = ListingOptions { list_tags: true, ..Default::default() };
    /// assert!(!tags_only.or_list_tasks().list_tasks);
    /// ```
    pub fn or_list_tasks(self) -> Self {
        if self.any() {
            self
        } else {
            Self {
                list_tasks: true,
                ..self
            }
        }
    }
}

/// Parameters for listing one or more playbooks.
#[derive(Debug, Clone, Default)]
pub struct ListTasks {
    /// Playbook files, listed in this order
    pub playbooks: Vec<PathBuf>,
    /// Requested output parts
    pub options: ListingOptions,
    /// Only list tasks carrying one of these tags (comma separated allowed)
    pub tags: Vec<String>,
    /// Never list tasks carrying one of these tags (comma separated allowed)
    pub skip_tags: Vec<String>,
    /// Inventory file or inline host list
    pub inventory: Option<String>,
    /// Narrow host lookups to this pattern
    pub limit: Option<String>,
}
