//! Implementation of the `burau-search search` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::adapters::sinks::PlainTextLog;
use crate::cli::output::progress::{create_hidden_progress_bar, create_progress_bar, ProgressSink};
use crate::cli::output::{colorize_outcome, list_table, output, CommandOutput};
use crate::domain::models::{Config, Outcome, TrajectorySimulator};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{SearchDriver, SearchSummary};

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// First total to scan
    #[arg(long)]
    pub total_min: Option<u32>,

    /// Last total to scan (inclusive)
    #[arg(long)]
    pub total_max: Option<u32>,

    /// Increment between totals
    #[arg(long)]
    pub total_step: Option<u32>,

    /// Capacity of the coefficient window (lower --start-level along with it)
    #[arg(long)]
    pub levels: Option<usize>,

    /// Level every trajectory starts at, below --levels
    #[arg(long)]
    pub start_level: Option<i64>,

    /// Number of totals scanned concurrently
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Research log file (truncated on start)
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Do not draw a progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl SearchArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(total_min) = self.total_min {
            config.search.total_min = total_min;
        }
        if let Some(total_max) = self.total_max {
            config.search.total_max = total_max;
        }
        if let Some(total_step) = self.total_step {
            config.search.total_step = total_step;
        }
        if let Some(levels) = self.levels {
            config.simulator.levels = levels;
        }
        if let Some(start_level) = self.start_level {
            config.simulator.start_level = start_level;
        }
        if let Some(jobs) = self.jobs {
            config.search.jobs = jobs;
        }
        if let Some(ref log_path) = self.log_path {
            config.output.log_path.clone_from(log_path);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub log_path: PathBuf,
    #[serde(flatten)]
    pub summary: SearchSummary,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        let summary = &self.summary;
        let tally = &summary.tally;
        let mut lines = vec![format!(
            "Done checking from {} to {} ({} totals, {} partitions, {} leftends skipped)",
            summary.total_min,
            summary.total_max,
            summary.totals,
            summary.partitions,
            summary.leftends_skipped
        )];

        let mut table = list_table(&["outcome", "runs"]);
        for (outcome, count) in [
            (Outcome::Complete, tally.complete),
            (Outcome::Partial, tally.partial),
            (Outcome::Overflow, tally.overflow),
            (Outcome::Failure, tally.failure),
        ] {
            table.add_row(vec![colorize_outcome(outcome).to_string(), count.to_string()]);
        }
        lines.push(table.to_string());

        if tally.overflow > 0 {
            lines.push(format!(
                "{} runs exceeded the coefficient window; rerun them with a larger --levels",
                tally.overflow
            ));
        }
        lines.push(format!("Findings written to {}", self.log_path.display()));
        lines.join("\n")
    }
}

/// Run the configured search, writing the research log.
pub async fn run_search(config: &Config, show_progress: bool) -> Result<SearchSummary> {
    let log = PlainTextLog::create(&config.output.log_path)
        .await
        .context("Failed to open research log")?;

    let totals = u64::try_from(config.search.totals().count()).unwrap_or(u64::MAX);
    let bar = if show_progress {
        create_progress_bar(totals)
    } else {
        create_hidden_progress_bar(totals)
    };
    let mut sink = ProgressSink::new(log, bar);

    let simulator = TrajectorySimulator::new(config.simulator.into());
    let driver = SearchDriver::new(simulator, config.search.clone());
    driver.run(&mut sink).await
}

pub async fn execute(args: SearchArgs, mut config: Config, json_mode: bool) -> Result<()> {
    args.apply(&mut config);
    ConfigLoader::validate(&config).context("Invalid search configuration")?;

    let show_progress = !(args.quiet || json_mode);
    let summary = run_search(&config, show_progress).await?;

    output(
        &SearchOutput {
            log_path: config.output.log_path.clone(),
            summary,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_only_given_fields() {
        let mut config = Config::default();
        let args = SearchArgs {
            total_max: Some(1400),
            jobs: Some(8),
            log_path: Some(PathBuf::from("out.log")),
            ..SearchArgs::default()
        };
        args.apply(&mut config);

        assert_eq!(config.search.total_min, 1300);
        assert_eq!(config.search.total_max, 1400);
        assert_eq!(config.search.jobs, 8);
        assert_eq!(config.simulator.levels, 10_000);
        assert_eq!(config.output.log_path, PathBuf::from("out.log"));
    }
}
