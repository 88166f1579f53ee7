use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::trajectory::LevelLimits;

/// Main configuration structure for the search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Range of totals and worker count
    #[serde(default)]
    pub search: SearchConfig,

    /// Coefficient window limits
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Research log destination
    #[serde(default)]
    pub output: OutputConfig,

    /// Diagnostics logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search range configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// First total (domain size) to scan
    #[serde(default = "default_total_min")]
    pub total_min: u32,

    /// Last total to scan (inclusive)
    #[serde(default = "default_total_max")]
    pub total_max: u32,

    /// Increment between consecutive totals
    #[serde(default = "default_total_step")]
    pub total_step: u32,

    /// Number of totals scanned concurrently (1 = sequential)
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

const fn default_total_min() -> u32 {
    1300
}

const fn default_total_max() -> u32 {
    2000
}

const fn default_total_step() -> u32 {
    4
}

const fn default_jobs() -> usize {
    1
}

impl SearchConfig {
    /// Totals in scan order.
    pub fn totals(&self) -> impl Iterator<Item = u32> {
        let step = usize::try_from(self.total_step.max(1)).unwrap_or(usize::MAX);
        (self.total_min..=self.total_max).step_by(step)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            total_min: default_total_min(),
            total_max: default_total_max(),
            total_step: default_total_step(),
            jobs: default_jobs(),
        }
    }
}

/// Coefficient window configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatorConfig {
    /// Capacity of the coefficient window
    #[serde(default = "default_levels")]
    pub levels: usize,

    /// Level every trajectory starts at
    #[serde(default = "default_start_level")]
    pub start_level: i64,
}

const fn default_levels() -> usize {
    LevelLimits::DEFAULT_LEVELS
}

const fn default_start_level() -> i64 {
    LevelLimits::DEFAULT_START_LEVEL
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            start_level: default_start_level(),
        }
    }
}

impl From<SimulatorConfig> for LevelLimits {
    fn from(config: SimulatorConfig) -> Self {
        Self::new(config.levels, config.start_level)
    }
}

/// Research log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Plain-text log receiving totals and findings
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("ivlog")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_totals_step_by_four() {
        let search = SearchConfig::default();
        let totals: Vec<u32> = search.totals().collect();
        assert_eq!(totals.first(), Some(&1300));
        assert_eq!(totals.last(), Some(&2000));
        assert_eq!(totals.len(), 176);
        assert!(totals.windows(2).all(|pair| pair[1] - pair[0] == 4));
    }

    #[test]
    fn test_totals_stop_before_overshooting() {
        let search = SearchConfig {
            total_min: 10,
            total_max: 21,
            total_step: 4,
            jobs: 1,
        };
        assert_eq!(search.totals().collect::<Vec<_>>(), vec![10, 14, 18]);
    }

    #[test]
    fn test_simulator_config_into_limits() {
        let limits: LevelLimits = SimulatorConfig::default().into();
        assert_eq!(limits, LevelLimits::default());
    }
}
