//! Response analytics commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::analytics::{responses_to_csv, summarize};
use crate::cli::CliStore;

/// Summarize a session's scanned responses
#[derive(Debug, Clone, Args)]
pub struct AnalyticsArgs {
    /// Analytics subcommand
    #[command(subcommand)]
    pub command: AnalyticsCommand,
}

/// Analytics subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum AnalyticsCommand {
    /// Print summary statistics
    Summary(SummaryArgs),
    /// Export responses as CSV
    Csv(CsvArgs),
}

/// Print summary statistics
#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    /// Session id
    #[arg(value_name = "SESSION_ID")]
    pub session_id: String,

    /// Output the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Export responses as CSV
#[derive(Debug, Clone, Args)]
pub struct CsvArgs {
    /// Session id
    #[arg(value_name = "SESSION_ID")]
    pub session_id: String,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl AnalyticsArgs {
    /// Execute the analytics command
    pub fn execute(&self, store: &CliStore) -> Result<()> {
        match &self.command {
            AnalyticsCommand::Summary(args) => args.execute(store),
            AnalyticsCommand::Csv(args) => args.execute(store),
        }
    }
}

impl SummaryArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        // Unknown sessions read as empty: the aggregator never fails
        let responses = store.session_responses(&self.session_id)?;
        let summary = summarize(&responses);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!("Analytics for session {}", self.session_id);
        println!("  Responses: {}", summary.total_responses);
        println!("  Participants: {}", summary.unique_participants);
        println!(
            "  Average confidence: {:.0}%",
            summary.average_confidence * 100.0
        );
        if !summary.responses_by_element_type.is_empty() {
            println!("  By element type:");
            for entry in &summary.responses_by_element_type {
                println!("    {}: {}", entry.element_type, entry.count);
            }
        }
        if !summary.common_words.is_empty() {
            println!("  Common words:");
            for word in &summary.common_words {
                println!("    {} ({})", word.word, word.count);
            }
        }
        if !summary.response_timeline.is_empty() {
            println!("  Timeline:");
            for bucket in &summary.response_timeline {
                println!("    {}: {}", bucket.date, bucket.count);
            }
        }
        Ok(())
    }
}

impl CsvArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        let responses = store.session_responses(&self.session_id)?;
        let csv = responses_to_csv(&responses);

        match &self.out {
            Some(path) => {
                fs::write(path, csv)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Exported {} response(s) to {}", responses.len(), path.display());
            }
            None => print!("{csv}"),
        }
        Ok(())
    }
}
