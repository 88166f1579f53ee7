//! Domain errors for the Burau kernel search.

use thiserror::Error;

/// Domain-level errors that can occur while building or classifying a run.
///
/// None of the four trajectory outcomes is an error; these variants only
/// cover inputs that do not describe a valid run and failures of the
/// reporting sink.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Partition widths {0:?} describe an empty domain")]
    EmptyPartition([u32; 3]),

    #[error("Leftend {leftend} out of range: must lie in 0..={max}")]
    LeftendOutOfRange { leftend: i64, max: i64 },

    #[error("Finding sink error: {0}")]
    Sink(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Sink(err.to_string())
    }
}
