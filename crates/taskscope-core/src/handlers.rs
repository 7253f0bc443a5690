//! Core handler functions for listing playbooks.
//!
//! The handlers run the whole pipeline and return summary models that the
//! front end renders as text or JSON:
//!
//! ```text
//! paths ─▶ validate ─▶ load ─▶ filter ─▶ traverse ─▶ summarize ─▶ render
//! ```
//!
//! Both output formats consume the same [`PlaybookSummary`], so the text and
//! JSON listings can never disagree about which tasks a playbook runs.
//!
//! ```rust,no_run
//! use taskscope_core::{handle_list_tasks, display::TextReport, params::ListTasks};
//!
//! let params = ListTasks {
//!     playbooks: vec!["site.yml".into()],
//!     ..Default::default()
//! };
//! let options = params.options.or_list_tasks();
//! for summary in handle_list_tasks(&params)? {
//!     print!("{}", TextReport::new(&summary, &options));
//! }
//! # Ok::<(), taskscope_core::ListingError>(())
//! ```

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{
    error::{ListingError, Result},
    filter::TagSelection,
    inventory::{Inventory, InventoryBuilder},
    loader,
    models::{Play, PlaySummary, Playbook, PlaybookSummary, TaskSummary},
    params::{ListTasks, ListingOptions},
    traversal::{self, ListedTask},
};

/// Check that every playbook exists and is a regular file or a pipe.
///
/// Runs before anything is loaded, so a bad path produces no partial
/// output.
///
/// # Errors
///
/// * `ListingError::InvalidInput` - When no playbook was given
/// * `ListingError::PlaybookNotFound` - When a path does not exist
/// * `ListingError::NotAFile` - When a path is a directory or device
pub fn validate_playbook_paths(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        return Err(ListingError::invalid_input("playbook")
            .with_reason("You must specify a playbook file to list"));
    }

    for path in paths {
        let metadata = std::fs::metadata(path).map_err(|_| ListingError::PlaybookNotFound {
            path: path.clone(),
        })?;
        if !(metadata.is_file() || is_fifo(&metadata)) {
            return Err(ListingError::NotAFile { path: path.clone() });
        }
    }
    Ok(())
}

#[cfg(unix)]
fn is_fifo(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    metadata.file_type().is_fifo()
}

#[cfg(not(unix))]
fn is_fifo(_metadata: &std::fs::Metadata) -> bool {
    false
}

/// Summarize one play: filter its blocks, traverse them and project the
/// listed tasks.
pub fn summarize_play(
    play: &Play,
    inventory: &Inventory,
    selection: &TagSelection,
    options: &ListingOptions,
) -> PlaySummary {
    let blocks = play.filtered_blocks(selection);
    let (listed, aggregator) = traversal::traverse(&blocks, &play.tags);
    debug!("Play '{}' lists {} tasks", play.name, listed.len());

    let tasks = listed
        .iter()
        .map(|entry| summarize_task(entry, options))
        .collect();
    let host_names = options.list_hosts.then(|| {
        inventory
            .get_hosts(&play.pattern())
            .iter()
            .map(|host| host.name().to_string())
            .collect::<Vec<_>>()
    });

    PlaySummary {
        hosts: play.pattern(),
        name: play.name.clone(),
        tags: play.tags.iter().cloned().collect(),
        tasks,
        path: if options.reports_paths() {
            play.path.clone()
        } else {
            None
        },
        host_names,
        task_tags: aggregator.snapshot(),
    }
}

fn summarize_task(entry: &ListedTask<'_>, options: &ListingOptions) -> TaskSummary {
    TaskSummary {
        name: entry.task.name().to_string(),
        tags: entry.tags.iter().cloned().collect(),
        path: if options.reports_paths() {
            entry.task.path().map(String::from)
        } else {
            None
        },
    }
}

/// Summarize every play of a loaded playbook.
pub fn summarize_playbook(
    playbook: &Playbook,
    inventory: &Inventory,
    selection: &TagSelection,
    options: &ListingOptions,
) -> PlaybookSummary {
    let mut summary = PlaybookSummary::new(
        display_path(&playbook.path),
        display_path(&playbook.directory),
    );
    for play in &playbook.plays {
        summary.add_play(summarize_play(play, inventory, selection, options));
    }
    summary
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// List every playbook named in `params`.
///
/// All paths are validated before the first playbook is loaded. When no
/// listing mode is selected, tasks are listed.
///
/// # Errors
///
/// Returns input errors from [`validate_playbook_paths`], inventory errors
/// from [`InventoryBuilder::build`] and load errors from
/// [`loader::load_playbook`].
pub fn handle_list_tasks(params: &ListTasks) -> Result<Vec<PlaybookSummary>> {
    validate_playbook_paths(&params.playbooks)?;

    let options = params.options.or_list_tasks();
    let selection = TagSelection::new(&params.tags, &params.skip_tags);
    let inventory = InventoryBuilder::new()
        .with_source(params.inventory.as_deref())
        .with_limit(params.limit.as_deref())
        .build()?;

    let mut summaries = Vec::with_capacity(params.playbooks.len());
    for path in &params.playbooks {
        let playbook = loader::load_playbook(path)?;
        let summary = summarize_playbook(&playbook, &inventory, &selection, &options);
        info!(
            "Listed {} tasks in {} plays of {}",
            summary.task_count(),
            summary.plays.len(),
            summary.playbook
        );
        summaries.push(summary);
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, Task, CONTROL_ACTION};

    fn options() -> ListingOptions {
        ListingOptions {
            list_tasks: true,
            ..Default::default()
        }
    }

    fn play() -> Play {
        Play::new(["web"])
            .with_name("Web")
            .with_tags(["p"])
            .with_block(
                Block::new()
                    .with_item(Task::new("apt").with_tags(["a"]).with_path("/pb.yml:4"))
                    .with_item(Task::new(CONTROL_ACTION).with_tags(["hidden"]))
                    .with_item(Task::new("service").with_name("Start").with_path("/pb.yml:6")),
            )
    }

    #[test]
    fn test_summarize_play_effective_tags() {
        let summary = summarize_play(
            &play(),
            &Inventory::empty(),
            &TagSelection::default(),
            &options(),
        );

        assert_eq!(summary.hosts, "web");
        assert_eq!(summary.name, "Web");
        assert_eq!(summary.tags, vec!["p"]);
        assert_eq!(summary.tasks.len(), 2);
        assert_eq!(summary.tasks[0].name, "apt");
        assert_eq!(summary.tasks[0].tags, vec!["a", "p"]);
        assert_eq!(summary.tasks[1].name, "Start");
        assert_eq!(summary.tasks[1].tags, vec!["p"]);
        assert_eq!(summary.task_tags, vec!["a", "p"]);
        assert!(summary.host_names.is_none());
    }

    #[test]
    fn test_paths_only_when_requested() {
        let summary = summarize_play(
            &play(),
            &Inventory::empty(),
            &TagSelection::default(),
            &options(),
        );
        assert!(summary.tasks.iter().all(|task| task.path.is_none()));

        let with_path = ListingOptions {
            list_tasks_with_path: true,
            ..Default::default()
        };
        let summary = summarize_play(
            &play(),
            &Inventory::empty(),
            &TagSelection::default(),
            &with_path,
        );
        assert_eq!(summary.tasks[0].path.as_deref(), Some("/pb.yml:4"));
    }

    #[test]
    fn test_hosts_only_when_requested() {
        let inventory = Inventory::from_host_list("web,db");
        let with_hosts = ListingOptions {
            list_hosts: true,
            ..Default::default()
        };
        let summary = summarize_play(&play(), &inventory, &TagSelection::default(), &with_hosts);
        assert_eq!(summary.host_names, Some(vec!["web".to_string()]));
    }

    #[test]
    fn test_tag_selection_applies() {
        let selection = TagSelection::new(["a"], Vec::<String>::new());
        let summary = summarize_play(&play(), &Inventory::empty(), &selection, &options());
        assert_eq!(summary.tasks.len(), 1);
        assert_eq!(summary.tasks[0].name, "apt");
        assert_eq!(summary.task_tags, vec!["a", "p"]);
    }

    #[test]
    fn test_validate_playbook_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("site.yml");
        std::fs::write(&file, "[]").unwrap();

        assert!(validate_playbook_paths(&[file.clone()]).is_ok());
        assert!(matches!(
            validate_playbook_paths(&[]),
            Err(ListingError::InvalidInput { .. })
        ));
        assert!(matches!(
            validate_playbook_paths(&[file.clone(), dir.path().join("missing.yml")]),
            Err(ListingError::PlaybookNotFound { .. })
        ));
        assert!(matches!(
            validate_playbook_paths(&[dir.path().to_path_buf()]),
            Err(ListingError::NotAFile { .. })
        ));
    }
}
