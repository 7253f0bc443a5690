//! Command-line interface definitions using clap
//!
//! Arguments are parsed into [`Cli`] and converted into the core
//! [`ListTasks`] parameters, so the core crate never depends on clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → handlers
//! ```

use std::path::PathBuf;

use clap::Parser;
use taskscope_core::params::{ListTasks, ListingOptions};

/// List the tasks, tags and hosts a playbook would run, without running it
///
/// Each playbook is loaded, filtered by the requested tags and walked play
/// by play. Tasks are printed in execution order together with their
/// effective tags. When no listing flag is given, `--list-tasks` is assumed.
#[derive(Parser, Debug)]
#[command(version, about, name = "taskscope")]
pub struct Cli {
    /// Playbook files to list
    #[arg(required = true, value_name = "PLAYBOOK")]
    pub playbooks: Vec<PathBuf>,

    /// List all tasks that would be executed
    #[arg(long)]
    pub list_tasks: bool,

    /// List all tasks with the file and line they are defined at
    #[arg(long)]
    pub list_tasks_with_path: bool,

    /// List all tasks as one JSON document per playbook
    #[arg(long)]
    pub list_tasks_json: bool,

    /// List all available tags
    #[arg(long)]
    pub list_tags: bool,

    /// List the hosts each play would target
    #[arg(long)]
    pub list_hosts: bool,

    /// Inventory file or comma separated host list. Defaults to
    /// $XDG_CONFIG_HOME/taskscope/hosts.yml
    #[arg(short, long)]
    pub inventory: Option<String>,

    /// Further limit selected hosts to an additional pattern
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Only list tasks tagged with these values (repeatable, comma separated)
    #[arg(short, long = "tags", value_name = "TAGS")]
    pub tags: Vec<String>,

    /// Skip tasks tagged with these values (repeatable, comma separated)
    #[arg(long = "skip-tags", value_name = "TAGS")]
    pub skip_tags: Vec<String>,
}

impl Cli {
    /// Requested listing modes
    pub fn options(&self) -> ListingOptions {
        ListingOptions {
            list_tasks: self.list_tasks,
            list_tasks_with_path: self.list_tasks_with_path,
            list_tasks_json: self.list_tasks_json,
            list_tags: self.list_tags,
            list_hosts: self.list_hosts,
        }
    }
}

impl From<Cli> for ListTasks {
    fn from(val: Cli) -> Self {
        ListTasks {
            options: val.options(),
            playbooks: val.playbooks,
            tags: val.tags,
            skip_tags: val.skip_tags,
            inventory: val.inventory,
            limit: val.limit,
        }
    }
}
