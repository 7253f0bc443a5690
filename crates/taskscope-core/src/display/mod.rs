//! Rendering of listing summaries.
//!
//! Summaries are plain data; this module turns them into output. Two formats
//! are supported and both read the same [`PlaybookSummary`]:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │ PlaybookSummary │───▶│   TextReport    │───▶│  indented text  │
//! │                 │    ├─────────────────┤    ├─────────────────┤
//! │                 │───▶│   render_json   │───▶│  JSON document  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`report`]: the [`TextReport`] Display wrapper
//! - [`json`]: null pruning and the JSON document
//! - [`models`]: Display implementations for summary models
//!
//! [`PlaybookSummary`]: crate::models::PlaybookSummary

pub mod json;
pub mod models;
pub mod report;

pub use json::{prune_nulls, render_json, to_document, to_pruned_value};
pub use report::TextReport;
