//! CLI command implementations.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{parse_identity, SessionConfig};
use crate::driver::run_session;
use crate::output::*;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "ballot")]
#[command(about = "Ballot - chairperson-managed voting with delegation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Log level / filter directives
    #[arg(short, long, global = true, default_value = "info", env = "BALLOT_LOG")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a session file against a fresh ballot
    Run {
        /// Session file (TOML)
        file: PathBuf,

        /// Abort on the first failing call
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default session file
    Init {
        /// Output path
        #[arg(short, long, default_value = "ballot.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the address derived from a label
    Address {
        /// Participant label or address
        label: String,
    },
}

/// Execute a command.
pub fn execute(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run { file, strict, json } => run(&file, strict, json),
        Commands::Init { output, force } => init(&output, force),
        Commands::Address { label } => address(&label),
    }
}

fn run(file: &Path, strict: bool, json: bool) -> anyhow::Result<()> {
    let config = SessionConfig::from_file(file)?;
    let report = run_session(&config, strict)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn init(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            output.display()
        );
    }

    SessionConfig::default().to_file(output)?;
    print_success(&format!("Session written to {}", output.display()));
    print_info(&format!("Run it with: ballot run {}", output.display()));
    Ok(())
}

fn address(label: &str) -> anyhow::Result<()> {
    let addr = parse_identity(label)?;
    println!("{}", "Participant".bold());
    println!("{}", "=".repeat(50));
    println!("Label:    {}", label);
    println!("Hex:      {}", format!("{:x}", addr).bright_cyan());
    println!("Bech32m:  {}", addr.to_string().bright_green());
    Ok(())
}
