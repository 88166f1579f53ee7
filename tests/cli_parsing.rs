use std::path::PathBuf;

use burau_search::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_parse_search_defaults() {
    let cli = Cli::try_parse_from(vec!["burau-search", "search"]).unwrap();

    assert!(!cli.json);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Search(args) => {
            assert!(args.total_min.is_none());
            assert!(args.total_max.is_none());
            assert!(args.total_step.is_none());
            assert!(args.levels.is_none());
            assert!(args.jobs.is_none());
            assert!(args.log_path.is_none());
            assert!(!args.quiet);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_search_with_overrides() {
    let cli = Cli::try_parse_from(vec![
        "burau-search",
        "search",
        "--total-min",
        "40",
        "--total-max",
        "80",
        "--total-step",
        "2",
        "--levels",
        "2000",
        "--start-level",
        "1000",
        "--jobs",
        "4",
        "--log-path",
        "out/ivlog",
        "-q",
    ])
    .unwrap();

    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.total_min, Some(40));
            assert_eq!(args.total_max, Some(80));
            assert_eq!(args.total_step, Some(2));
            assert_eq!(args.levels, Some(2000));
            assert_eq!(args.start_level, Some(1000));
            assert_eq!(args.jobs, Some(4));
            assert_eq!(args.log_path, Some(PathBuf::from("out/ivlog")));
            assert!(args.quiet);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_classify() {
    let cli = Cli::try_parse_from(vec![
        "burau-search",
        "classify",
        "701",
        "2",
        "597",
        "--leftend",
        "650",
        "--trace",
    ])
    .unwrap();

    match cli.command {
        Commands::Classify(args) => {
            assert_eq!(args.widths(), [701, 2, 597]);
            assert_eq!(args.leftend, 650);
            assert!(args.trace);
            assert!(args.levels.is_none());
            assert!(args.start_level.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_classify_requires_leftend() {
    let result = Cli::try_parse_from(vec!["burau-search", "classify", "3", "0", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_classify_rejects_non_numeric_width() {
    let result =
        Cli::try_parse_from(vec!["burau-search", "classify", "3", "two", "1", "--leftend", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(vec![
        "burau-search",
        "config",
        "--json",
        "--config",
        "run.yaml",
        "--no-validate",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("run.yaml")));
    match cli.command {
        Commands::Config(args) => assert!(args.no_validate),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_unknown_command_fails() {
    assert!(Cli::try_parse_from(vec!["burau-search", "swarm"]).is_err());
}
