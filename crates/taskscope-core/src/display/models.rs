//! Display implementations for summary models.

use std::fmt;

use crate::models::TaskSummary;

impl fmt::Display for TaskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\tTAGS: [{}]", self.name, self.tags.join(", "))?;
        if let Some(path) = &self.path {
            write!(f, "\tPATH: [{path}]")?;
        }
        Ok(())
    }
}
