//! Taskscope CLI Application
//!
//! Command-line interface for listing the tasks, tags and hosts of
//! playbooks.

mod cli;
mod renderer;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::ReportRenderer;
use taskscope_core::{handle_list_tasks, params::ListTasks};

fn main() -> Result<()> {
    env_logger::init();

    let params = ListTasks::from(Cli::parse());
    let options = params.options.or_list_tasks();

    info!("Listing {} playbooks", params.playbooks.len());
    let summaries = handle_list_tasks(&params).context("Failed to list playbooks")?;

    ReportRenderer::new(std::io::stdout().lock(), options).render(&summaries)
}
