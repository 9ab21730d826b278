//! Bulk import/export commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::cli::CliStore;

/// Import, export, and reset stored data
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Data subcommand
    #[command(subcommand)]
    pub command: DataCommand,
}

/// Data subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum DataCommand {
    /// Export all templates and sessions as JSON
    Export(ExportArgs),
    /// Merge a previously exported JSON blob
    Import(ImportArgs),
    /// Delete all stored templates and sessions
    Clear(ClearArgs),
}

/// Export all templates and sessions as JSON
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Merge a previously exported JSON blob
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Path to the exported JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Delete all stored templates and sessions
#[derive(Debug, Clone, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

impl DataArgs {
    /// Execute the data command
    pub fn execute(&self, store: &mut CliStore) -> Result<()> {
        match &self.command {
            DataCommand::Export(args) => args.execute(store),
            DataCommand::Import(args) => args.execute(store),
            DataCommand::Clear(args) => args.execute(store),
        }
    }
}

impl ExportArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        let blob = store.export_all()?;
        match &self.out {
            Some(path) => {
                fs::write(path, blob)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Exported data to {}", path.display());
            }
            None => println!("{blob}"),
        }
        Ok(())
    }
}

impl ImportArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        let blob = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let report = store.import_all(&blob)?;
        println!(
            "Imported {} template(s) and {} session(s)",
            report.templates_imported, report.sessions_imported
        );
        Ok(())
    }
}

impl ClearArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        if !self.yes {
            anyhow::bail!("Refusing to clear without --yes");
        }
        store.clear_all()?;
        println!("All stored data cleared");
        Ok(())
    }
}
