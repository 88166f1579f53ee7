//! Implementation of the `burau-search config` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Skip validation and print the merged values as they are
    #[arg(long)]
    pub no_validate: bool,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConfigOutput {
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }
}

pub async fn execute(args: ConfigArgs, config: Config, json_mode: bool) -> Result<()> {
    if !args.no_validate {
        ConfigLoader::validate(&config).context("Configuration is invalid")?;
    }
    output(&ConfigOutput { config }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_output_is_yaml() {
        let rendered = ConfigOutput {
            config: Config::default(),
        }
        .to_human();
        let parsed: Config = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed.search.total_min, 1300);
        assert_eq!(parsed.simulator.levels, 10_000);
    }

    #[test]
    fn test_json_output_has_sections() {
        let json = ConfigOutput {
            config: Config::default(),
        }
        .to_json();
        assert_eq!(json["search"]["total_step"], 4);
        assert_eq!(json["output"]["log_path"], "ivlog");
    }
}
