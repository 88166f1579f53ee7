//! Finding sink adapters.
//!
//! Both sinks render through [`LogEvent`], so the in-memory sink produces
//! exactly the lines the log file would contain.

use std::fmt;

use crate::domain::models::Finding;

pub mod log_file;
pub mod memory;

pub use log_file::PlainTextLog;
pub use memory::MemorySink;

/// One line of the research log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Total(u32),
    Finding(Finding),
    Finished { total_min: u32, total_max: u32 },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Total(total) => write!(f, "{total}"),
            Self::Finding(finding) => write!(f, "{finding}"),
            Self::Finished {
                total_min,
                total_max,
            } => write!(f, "Done checking from {total_min} to {total_max}"),
        }
    }
}
