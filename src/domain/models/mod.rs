pub mod config;
pub mod outcome;
pub mod partition;
pub mod trajectory;

pub use config::{Config, LoggingConfig, OutputConfig, SearchConfig, SimulatorConfig};
pub use outcome::{Finding, Outcome};
pub use partition::{Partition, HUMPS};
pub use trajectory::{
    classify_fixed_point, CoefficientWindow, LevelLimits, Progress, StepRecord, TraceReport,
    Trajectory, TrajectorySimulator, TrajectoryState,
};
