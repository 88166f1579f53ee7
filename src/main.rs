//! burau-search CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use burau_search::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = cli.json;

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::handle_error(&err, json_mode);
            ExitCode::FAILURE
        }
    }
}
