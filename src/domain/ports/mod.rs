//! Port trait definitions (Hexagonal Architecture)
//!
//! - Classifier: decides the outcome of one `(partition, leftend)` run
//! - FindingSink: receives the search log as it is produced
//!
//! The search driver depends only on these traits, so the simulator and the
//! log file can be swapped for stubs in tests.

pub mod classifier;
pub mod finding_sink;

pub use classifier::Classifier;
pub use finding_sink::FindingSink;
