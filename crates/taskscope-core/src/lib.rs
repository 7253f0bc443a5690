//! Core library for the Taskscope playbook listing tool.
//!
//! Taskscope answers "what would this playbook run?" without running
//! anything. It loads playbooks, applies tag selection, walks every play's
//! block tree and reports the tasks it finds together with their effective
//! tags.
//!
//! # Pipeline
//!
//! - [`loader`]: reads playbook YAML into the [`models`] tree
//! - [`filter`]: applies `--tags` / `--skip-tags` selection to blocks
//! - [`traversal`]: walks blocks in execution order and computes each task's
//!   effective tags
//! - [`tags`]: tag sets and the per-play [`tags::TagAggregator`]
//! - [`inventory`]: resolves play host patterns for `--list-hosts`
//! - [`handlers`]: drives the steps above into summary models
//! - [`display`]: renders summaries as text or JSON
//!
//! # Quick Start
//!
//! ```rust
//! use taskscope_core::{
//!     display::TextReport, handlers::summarize_play, inventory::Inventory,
//!     filter::TagSelection, models::{Block, Play, PlaybookSummary, Task},
//!     params::ListingOptions,
//! };
//!
//! let play = Play::new(["all"]).with_name("Ping").with_block(
//!     Block::new().with_tags(["net"]).with_item(Task::new("ping")),
//! );
//! let options = ListingOptions { list_tasks: true, ..Default::default() };
//!
//! let mut summary = PlaybookSummary::new("site.yml", "/srv");
//! summary.add_play(summarize_play(
//!     &play,
//!     &Inventory::empty(),
//!     &TagSelection::default(),
//!     &options,
//! ));
//!
//! let text = TextReport::new(&summary, &options).to_string();
//! assert!(text.contains("      ping\tTAGS: [net]\n"));
//! ```

pub mod display;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod inventory;
pub mod loader;
pub mod models;
pub mod params;
pub mod tags;
pub mod traversal;

// Re-export commonly used types
pub use display::{render_json, TextReport};
pub use error::{ListingError, Result};
pub use filter::TagSelection;
pub use handlers::{handle_list_tasks, summarize_play, summarize_playbook};
pub use inventory::{Host, Inventory, InventoryBuilder};
pub use models::{
    Block, BlockItem, Play, PlaySummary, Playbook, PlaybookSummary, Task, TaskSummary,
};
pub use params::{ListTasks, ListingOptions};
pub use tags::{TagAggregator, TagSet};
pub use traversal::{BlockTraversal, ListedTask};
