//! Finding sink port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Finding;

/// Destination for search progress and findings.
///
/// The driver calls these in a fixed order: for each total in ascending
/// order, `begin_total` followed by that total's findings; then `finish`
/// exactly once.
#[async_trait]
pub trait FindingSink: Send {
    /// A new total is about to be reported.
    async fn begin_total(&mut self, total: u32) -> DomainResult<()>;

    /// Record a non-failure classification.
    async fn record(&mut self, finding: &Finding) -> DomainResult<()>;

    /// The whole range `total_min..=total_max` has been scanned.
    async fn finish(&mut self, total_min: u32, total_max: u32) -> DomainResult<()>;
}
