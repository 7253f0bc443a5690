//! Indented text report for playbook listings.

use std::fmt;

use crate::{
    models::{PlaySummary, PlaybookSummary},
    params::ListingOptions,
};

/// Wrapper formatting a [`PlaybookSummary`] as the text listing.
///
/// The layout is stable; scripts parse it. `\t` separates a name from its
/// `TAGS:` and `PATH:` columns:
///
/// ```text
///
/// playbook: site.yml
///
///   play #1 (webservers): Web tier	TAGS: [web]
///     tasks:
///       Install nginx	TAGS: [packages, web]
///       service	TAGS: [web]
///
/// ```
///
/// # Examples
///
/// ```rust
/// use taskscope_core::{
///     display::TextReport,
///     models::{PlaySummary, PlaybookSummary, TaskSummary},
///     params::ListingOptions,
/// };
///
/// let mut summary = PlaybookSummary::new("site.yml", "/srv");
/// summary.add_play(PlaySummary {
///     hosts: "all".to_string(),
///     name: "Ping".to_string(),
///     tags: vec![],
///     tasks: vec![TaskSummary {
///         name: "ping".to_string(),
///         tags: vec![],
///         path: None,
///     }],
///     path: None,
///     host_names: None,
///     task_tags: vec![],
/// });
///
/// let options = ListingOptions { list_tasks: true, ..Default::default() };
/// let output = TextReport::new(&summary, &options).to_string();
/// assert_eq!(
///     output,
///     "\nplaybook: site.yml\n\n  play #1 (all): Ping\tTAGS: []\n    tasks:\n      ping\tTAGS: []\n\n"
/// );
/// ```
pub struct TextReport<'a> {
    summary: &'a PlaybookSummary,
    options: &'a ListingOptions,
}

impl<'a> TextReport<'a> {
    /// Create a report for one playbook.
    pub fn new(summary: &'a PlaybookSummary, options: &'a ListingOptions) -> Self {
        Self { summary, options }
    }

    fn fmt_play(&self, f: &mut fmt::Formatter<'_>, number: usize, play: &PlaySummary) -> fmt::Result {
        writeln!(f)?;
        write!(
            f,
            "  play #{number} ({}): {}\tTAGS: [{}]",
            play.hosts,
            play.name,
            play.tags.join(",")
        )?;
        if let Some(path) = &play.path {
            write!(f, "\tPATH: [{path}]")?;
        }
        if let Some(hosts) = &play.host_names {
            write!(f, "\n    pattern: {}\n    hosts ({}):", play.hosts, hosts.len())?;
            for host in hosts {
                write!(f, "\n      {host}")?;
            }
        }
        writeln!(f)?;

        let lists_tasks = self.options.lists_tasks();
        if !lists_tasks && !self.options.list_tags {
            return Ok(());
        }
        if lists_tasks {
            writeln!(f, "    tasks:")?;
            for task in &play.tasks {
                writeln!(f, "      {task}")?;
            }
        }
        if self.options.list_tags {
            writeln!(f, "      TASK TAGS: [{}]", play.task_tags.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "playbook: {}", self.summary.playbook)?;
        for (index, play) in self.summary.plays.iter().enumerate() {
            self.fmt_play(f, index + 1, play)?;
        }
        Ok(())
    }
}
