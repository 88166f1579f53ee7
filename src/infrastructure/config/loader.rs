use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Upper bound on concurrently scanned totals.
pub const MAX_JOBS: usize = 256;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid total range: total_min ({0}) must not exceed total_max ({1})")]
    InvalidTotalRange(u32, u32),

    #[error("Invalid total_step: {0}. Must be at least 1")]
    InvalidTotalStep(u32),

    #[error("Invalid levels: {0}. Must be at least 1")]
    InvalidLevels(usize),

    #[error("Invalid start_level: {start_level}. Must lie in 0..{levels}")]
    StartLevelOutOfRange { start_level: i64, levels: usize },

    #[error("Invalid jobs: {0}. Must be between 1 and 256")]
    InvalidJobs(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Research log path cannot be empty")]
    EmptyLogPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Project configuration file.
    pub const PROJECT_CONFIG: &'static str = ".burau/config.yaml";
    /// Optional local overrides, usually left out of version control.
    pub const LOCAL_CONFIG: &'static str = ".burau/local.yaml";
    /// Prefix of environment overrides; `__` separates nested keys.
    pub const ENV_PREFIX: &'static str = "BURAU_";

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .burau/config.yaml (project config)
    /// 3. .burau/local.yaml (local overrides, optional)
    /// 4. `extra`, usually the file given with `--config`
    /// 5. Environment variables (BURAU_* prefix, highest priority)
    ///
    /// The result is not validated yet: command-line overrides are applied
    /// on top by the caller, which then calls [`ConfigLoader::validate`].
    pub fn load(extra: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(Self::PROJECT_CONFIG))
            .merge(Yaml::file(Self::LOCAL_CONFIG));

        if let Some(path) = extra {
            anyhow::ensure!(path.exists(), "config file {} does not exist", path.display());
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let search = &config.search;
        if search.total_min > search.total_max {
            return Err(ConfigError::InvalidTotalRange(
                search.total_min,
                search.total_max,
            ));
        }

        if search.total_step == 0 {
            return Err(ConfigError::InvalidTotalStep(search.total_step));
        }

        if search.jobs == 0 || search.jobs > MAX_JOBS {
            return Err(ConfigError::InvalidJobs(search.jobs));
        }

        let simulator = &config.simulator;
        if simulator.levels == 0 {
            return Err(ConfigError::InvalidLevels(simulator.levels));
        }

        let in_window = usize::try_from(simulator.start_level)
            .is_ok_and(|start| start < simulator.levels);
        if !in_window {
            return Err(ConfigError::StartLevelOutOfRange {
                start_level: simulator.start_level,
                levels: simulator.levels,
            });
        }

        if config.output.log_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyLogPath);
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
