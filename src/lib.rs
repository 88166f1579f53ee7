//! burau-search - trajectory search for Burau kernel elements
//!
//! For every partition of a cyclic domain into three humps and every
//! admissible reflection axis, a deterministic billiard trajectory is walked
//! over the domain while a signed coefficient sequence is built up. A
//! trajectory that closes up with no residual norm is a candidate element of
//! the kernel of the Burau representation for n = 4.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): partition model, trajectory simulator, ports
//! - **Service Layer** (`services`): gcd filtering and the search driver
//! - **Adapters** (`adapters`): research log sinks
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use burau_search::{LevelLimits, Outcome, Partition, TrajectorySimulator};
//!
//! let partition = Partition::new([3, 0, 1]).unwrap();
//! let simulator = TrajectorySimulator::new(LevelLimits::default());
//! assert_eq!(simulator.classify(&partition, 0).unwrap(), Outcome::Failure);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{MemorySink, PlainTextLog};
pub use domain::models::{
    Config, Finding, LevelLimits, Outcome, Partition, StepRecord, Trajectory, TrajectorySimulator,
};
pub use domain::ports::{Classifier, FindingSink};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{SearchDriver, SearchSummary};
