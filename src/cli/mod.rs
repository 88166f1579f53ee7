//! Command-line interface.
//!
//! Configuration is loaded once, the diagnostics logger is installed from
//! it, and the selected command receives the merged configuration to apply
//! its own flags on top.

pub mod commands;
pub mod output;
pub mod types;

use anyhow::Result;

pub use types::{Cli, Commands};

use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;

/// Execute the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Search(args) => commands::search::execute(args, config, cli.json).await,
        Commands::Classify(args) => commands::classify::execute(args, config, cli.json).await,
        Commands::Config(args) => commands::config::execute(args, config, cli.json).await,
    }
}

/// Print an error in the selected output mode.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
}
