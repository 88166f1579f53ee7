//! CLI type definitions
//!
//! This module contains the clap command structures that define the CLI
//! interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::classify::ClassifyArgs;
use super::commands::config::ConfigArgs;
use super::commands::search::SearchArgs;

#[derive(Parser, Debug)]
#[command(name = "burau-search")]
#[command(about = "Trajectory search for kernel elements of the Burau representation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Additional YAML configuration file, merged over .burau/config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan every partition and leftend of the configured total range
    Search(SearchArgs),

    /// Classify a single partition and leftend
    Classify(ClassifyArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}
