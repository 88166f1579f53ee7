//! Classifier port.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Outcome, Partition};

/// Classifies one `(partition, leftend)` pair.
///
/// Implementations must be pure: the search driver may call them from
/// several worker threads and relies on identical inputs giving identical
/// outcomes.
pub trait Classifier: Send + Sync {
    fn classify(&self, partition: &Partition, leftend: i64) -> DomainResult<Outcome>;
}

impl<C> Classifier for Arc<C>
where
    C: Classifier + ?Sized,
{
    fn classify(&self, partition: &Partition, leftend: i64) -> DomainResult<Outcome> {
        (**self).classify(partition, leftend)
    }
}
