//! Data models for playbooks and listing summaries.
//!
//! Two families of types live here:
//!
//! - **Input models** ([`Playbook`], [`Play`], [`Block`], [`Task`]): the
//!   compiled playbook tree the listing reads. They are built by the
//!   [`crate::loader`] and never mutated afterwards.
//! - **Summary models** ([`PlaybookSummary`], [`PlaySummary`],
//!   [`TaskSummary`]): what a listing produced. Both the text report and the
//!   JSON document are rendered from these, see [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use taskscope_core::models::{Block, Play, Task};
//!
//! let play = Play::new(["webservers"])
//!     .with_tags(["web"])
//!     .with_block(
//!         Block::new()
//!             .with_item(Task::new("apt").with_name("Install nginx"))
//!             .with_item(Block::new().with_item(Task::new("service"))),
//!     );
//!
//! // One block of tasks plus three implicit handler flushes
//! assert_eq!(play.compile().len(), 4);
//! assert_eq!(play.name, "webservers");
//! ```

pub mod block;
pub mod play;
pub mod summary;


pub use block::{Block, BlockItem, Task, CONTROL_ACTION};
pub use play::{Play, Playbook};
pub use summary::{PlaySummary, PlaybookSummary, TaskSummary};
