//! Cardcraft - Workshop card toolkit
//!
//! Command-line front end for designing workshop cards, managing templates
//! and sessions, previewing print layouts, and aggregating scanned
//! participant responses.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cardcraft::cli::{
    AnalyticsArgs, CliStore, DataArgs, PrintArgs, ScanArgs, SessionArgs, TemplateArgs,
};
use cardcraft::clock::SystemClock;
use cardcraft::config::Config;
use cardcraft::store::{DataStore, FileBackend};

/// Cardcraft - Workshop card toolkit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the data directory
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage card templates
    Template(TemplateArgs),
    /// Manage workshop sessions
    Session(SessionArgs),
    /// Compute a print layout for a template
    Print(PrintArgs),
    /// Summarize session responses
    Analytics(AnalyticsArgs),
    /// Encode and decode QR payloads
    Scan(ScanArgs),
    /// Import, export, and reset stored data
    Data(DataArgs),
}

fn open_store(config: &Config, data_dir: Option<PathBuf>) -> Result<CliStore> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    Ok(DataStore::new(FileBackend::new(data_dir)?, SystemClock))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Scan commands are pure; they never touch configuration or the store
    if let Command::Scan(args) = &cli.command {
        return args.execute();
    }

    let config = Config::load()?;
    let mut store = open_store(&config, cli.data_dir)?;

    match cli.command {
        Command::Template(args) => args.execute(&mut store),
        Command::Session(args) => args.execute(&mut store),
        Command::Print(args) => args.execute(&store, &config),
        Command::Analytics(args) => args.execute(&store),
        Command::Scan(_) => unreachable!("handled above"),
        Command::Data(args) => args.execute(&mut store),
    }
}
