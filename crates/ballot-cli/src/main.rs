//! Ballot CLI - Session driver for the ballot ledger.
//!
//! Deploys a ballot from a session file, replays caller-attributed calls
//! and reports the tally and winner.

pub mod commands;
pub mod config;
pub mod driver;
pub mod output;
pub mod telemetry;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    match &cli.log_file {
        Some(path) => telemetry::init_telemetry_with_file(&cli.log_level, path)?,
        None => telemetry::init_telemetry(&cli.log_level, cli.log_json)?,
    }

    if let Err(e) = commands::execute(cli.command) {
        output::print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
