//! Output rendering for playbook listings
//!
//! Writes each playbook summary either as the text report or as a JSON
//! document, depending on the requested listing options.

use std::io::Write;

use anyhow::{Context, Result};
use taskscope_core::{
    display::{render_json, TextReport},
    models::PlaybookSummary,
    params::ListingOptions,
};

/// Renderer writing listings to any output stream
pub struct ReportRenderer<W: Write> {
    out: W,
    options: ListingOptions,
}

impl<W: Write> ReportRenderer<W> {
    /// Create a new renderer for the given output and listing modes
    pub fn new(out: W, options: ListingOptions) -> Self {
        Self { out, options }
    }

    /// Render every summary in order, then flush
    pub fn render(&mut self, summaries: &[PlaybookSummary]) -> Result<()> {
        for summary in summaries {
            if self.options.is_json() {
                let document = render_json(summary)
                    .with_context(|| format!("Failed to serialize {}", summary.playbook))?;
                writeln!(self.out, "{document}")?;
            } else {
                write!(self.out, "{}", TextReport::new(summary, &self.options))?;
            }
        }
        self.out.flush().context("Failed to flush output")
    }
}
