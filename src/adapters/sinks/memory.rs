//! In-memory sink, used by tests and by callers that post-process findings.

use async_trait::async_trait;

use super::LogEvent;
use crate::domain::errors::DomainResult;
use crate::domain::models::Finding;
use crate::domain::ports::FindingSink;

/// Keeps every reported event in order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<LogEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    /// Recorded findings, in report order.
    pub fn findings(&self) -> Vec<Finding> {
        self.events
            .iter()
            .filter_map(|event| match event {
                LogEvent::Finding(finding) => Some(*finding),
                _ => None,
            })
            .collect()
    }

    /// The lines a [`super::PlainTextLog`] would have written.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl FindingSink for MemorySink {
    async fn begin_total(&mut self, total: u32) -> DomainResult<()> {
        self.events.push(LogEvent::Total(total));
        Ok(())
    }

    async fn record(&mut self, finding: &Finding) -> DomainResult<()> {
        self.events.push(LogEvent::Finding(*finding));
        Ok(())
    }

    async fn finish(&mut self, total_min: u32, total_max: u32) -> DomainResult<()> {
        self.events.push(LogEvent::Finished {
            total_min,
            total_max,
        });
        Ok(())
    }
}
