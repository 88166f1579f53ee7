//! Plain-text research log.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::LogEvent;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Finding;
use crate::domain::ports::FindingSink;

/// Appends one line per event to a file, flushing after every line so a
/// long search can be followed with `tail -f`.
pub struct PlainTextLog {
    file: File,
}

impl PlainTextLog {
    /// Create (or truncate) the log at `path`.
    pub async fn create(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).await.map_err(|err| {
            DomainError::Sink(format!("cannot create {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "research log opened");
        Ok(Self { file })
    }

    async fn write_line(&mut self, event: LogEvent) -> DomainResult<()> {
        let line = format!("{event}\n");
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl FindingSink for PlainTextLog {
    async fn begin_total(&mut self, total: u32) -> DomainResult<()> {
        self.write_line(LogEvent::Total(total)).await
    }

    async fn record(&mut self, finding: &Finding) -> DomainResult<()> {
        self.write_line(LogEvent::Finding(*finding)).await
    }

    async fn finish(&mut self, total_min: u32, total_max: u32) -> DomainResult<()> {
        self.write_line(LogEvent::Finished {
            total_min,
            total_max,
        })
        .await?;
        self.file.sync_all().await?;
        Ok(())
    }
}
