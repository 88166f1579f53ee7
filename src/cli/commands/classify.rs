//! Implementation of the `burau-search classify` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{colorize_outcome, list_table, output, CommandOutput};
use crate::domain::models::{Config, Finding, Outcome, Partition, StepRecord, TrajectorySimulator};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{admissible_leftends, gcd_of};

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Width of hump 0
    pub w0: u32,

    /// Width of hump 1
    pub w1: u32,

    /// Width of hump 2
    pub w2: u32,

    /// Reflection axis, between 0 and (w0 + w1 + w2) / 2
    #[arg(long, allow_negative_numbers = true)]
    pub leftend: i64,

    /// Capacity of the coefficient window (lower --start-level along with it)
    #[arg(long)]
    pub levels: Option<usize>,

    /// Level the trajectory starts at, below --levels
    #[arg(long, allow_negative_numbers = true)]
    pub start_level: Option<i64>,

    /// Include every intermediate step
    #[arg(long)]
    pub trace: bool,
}

impl ClassifyArgs {
    pub const fn widths(&self) -> [u32; 3] {
        [self.w0, self.w1, self.w2]
    }

    /// Apply the window overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(levels) = self.levels {
            config.simulator.levels = levels;
        }
        if let Some(start_level) = self.start_level {
            config.simulator.start_level = start_level;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    pub widths: [u32; 3],
    pub leftend: i64,
    pub boundary: [i64; 3],
    pub fold: [i64; 3],
    pub widths_gcd: u64,
    /// Whether the search driver would try this leftend at all.
    pub admissible: bool,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepRecord>>,
}

impl CommandOutput for ClassifyOutput {
    fn to_human(&self) -> String {
        let [w0, w1, w2] = self.widths;
        let mut lines = vec![format!(
            "widths {w0},{w1},{w2}, leftend {}: {}",
            self.leftend,
            colorize_outcome(self.outcome)
        )];
        if !self.admissible {
            lines.push(format!(
                "note: leftend shares a factor with the widths' gcd {}; the search skips it",
                self.widths_gcd
            ));
        }
        if let Some(ref line) = self.log_line {
            lines.push(line.clone());
        }
        if let Some(ref steps) = self.steps {
            let mut table = list_table(&["step", "position", "level", "norm", "remaining"]);
            for (index, step) in steps.iter().enumerate() {
                table.add_row(vec![
                    (index + 1).to_string(),
                    step.position.to_string(),
                    step.level.to_string(),
                    step.norm.to_string(),
                    step.remaining.to_string(),
                ]);
            }
            lines.push(table.to_string());
        }
        lines.join("\n")
    }
}

/// Classify one pair under the given configuration.
pub fn classify(args: &ClassifyArgs, config: &Config) -> Result<ClassifyOutput> {
    let partition = Partition::new(args.widths())?;
    let simulator = TrajectorySimulator::new(config.simulator.into());

    let (outcome, steps) = if args.trace {
        let report = simulator.trace(&partition, args.leftend)?;
        (report.outcome, Some(report.steps))
    } else {
        (simulator.classify(&partition, args.leftend)?, None)
    };

    Ok(ClassifyOutput {
        widths: partition.widths(),
        leftend: args.leftend,
        boundary: partition.boundary(),
        fold: partition.fold(),
        widths_gcd: gcd_of(partition.widths().map(u64::from)),
        admissible: admissible_leftends(partition.widths()).any(|leftend| leftend == args.leftend),
        outcome,
        log_line: Finding::from_outcome(partition.widths(), args.leftend, outcome)
            .map(|finding| finding.to_string()),
        steps,
    })
}

pub async fn execute(args: ClassifyArgs, mut config: Config, json_mode: bool) -> Result<()> {
    args.apply(&mut config);
    ConfigLoader::validate(&config).context("Invalid simulator configuration")?;

    let result = classify(&args, &config)?;
    output(&result, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(widths: [u32; 3], leftend: i64, trace: bool) -> ClassifyArgs {
        ClassifyArgs {
            w0: widths[0],
            w1: widths[1],
            w2: widths[2],
            leftend,
            levels: None,
            start_level: None,
            trace,
        }
    }

    #[test]
    fn test_classify_with_trace() {
        let result = classify(&args([3, 0, 1], 0, true), &Config::default()).unwrap();
        assert_eq!(result.outcome, Outcome::Failure);
        assert_eq!(result.boundary, [3, 3, 4]);
        assert_eq!(result.fold, [2, 5, 6]);
        assert!(result.admissible);
        assert!(result.log_line.is_none());
        assert_eq!(result.steps.map(|steps| steps.len()), Some(1));
    }

    #[test]
    fn test_classify_reports_overflow_line() {
        let mut config = Config::default();
        config.simulator.levels = 50;
        config.simulator.start_level = 25;

        let result = classify(&args([2, 0, 18], 1, false), &config).unwrap();
        assert_eq!(result.outcome, Outcome::Overflow);
        assert_eq!(result.log_line.as_deref(), Some("Error o: widths 2,0,18, leftend 1"));
        assert!(result.steps.is_none());
    }

    #[test]
    fn test_single_level_window_overflows() {
        let mut classify_args = args([3, 2, 3], 1, true);
        classify_args.levels = Some(1);
        classify_args.start_level = Some(0);

        let mut config = Config::default();
        classify_args.apply(&mut config);
        ConfigLoader::validate(&config).unwrap();

        let result = classify(&classify_args, &config).unwrap();
        assert_eq!(result.outcome, Outcome::Overflow);
        assert_eq!(result.log_line.as_deref(), Some("Error o: widths 3,2,3, leftend 1"));
        assert_eq!(result.steps.map(|steps| steps.len()), Some(1));
    }

    #[test]
    fn test_levels_alone_keeps_default_start_level() {
        let mut classify_args = args([3, 2, 3], 1, false);
        classify_args.levels = Some(1);

        let mut config = Config::default();
        classify_args.apply(&mut config);
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_classify_complete_pair() {
        let result = classify(&args([13, 36, 35], 28, false), &Config::default()).unwrap();
        assert_eq!(result.outcome, Outcome::Complete);
        assert_eq!(result.log_line.as_deref(), Some("Error V: widths 13,36,35, leftend 28"));
    }

    #[test]
    fn test_classify_flags_skipped_leftend() {
        let result = classify(&args([6, 0, 6], 2, false), &Config::default()).unwrap();
        assert_eq!(result.widths_gcd, 6);
        assert!(!result.admissible);
    }

    #[test]
    fn test_classify_rejects_out_of_range_leftend() {
        assert!(classify(&args([3, 2, 3], 9, false), &Config::default()).is_err());
    }
}
