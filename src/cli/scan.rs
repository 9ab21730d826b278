//! QR payload encode/decode commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::clock::SystemClock;
use crate::scan::{encode_payload, parse_payload, QrPayload};

/// Encode and decode card QR payloads
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Scan subcommand
    #[command(subcommand)]
    pub command: ScanCommand,
}

/// Scan subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ScanCommand {
    /// Build the scan URL for a card
    Encode(EncodeArgs),
    /// Decode a scanned string
    Parse(ParseArgs),
}

/// Build the scan URL for a card
#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Base URL of the scan endpoint host
    #[arg(long, value_name = "URL")]
    pub base_url: String,

    /// Session id to embed
    #[arg(long, value_name = "SESSION_ID")]
    pub session: String,

    /// Card id to embed
    #[arg(long, value_name = "CARD_ID")]
    pub card: String,

    /// Optional element id to embed
    #[arg(long, value_name = "ELEMENT_ID")]
    pub element: Option<String>,
}

/// Decode a scanned string
#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    /// The raw scanned string
    #[arg(value_name = "DATA")]
    pub data: String,

    /// Output the decoded payload as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            ScanCommand::Encode(args) => args.execute(),
            ScanCommand::Parse(args) => args.execute(),
        }
    }
}

impl EncodeArgs {
    fn execute(&self) -> Result<()> {
        let url = encode_payload(
            &self.base_url,
            &self.session,
            &self.card,
            self.element.as_deref(),
            &SystemClock,
        )?;
        println!("{url}");
        Ok(())
    }
}

impl ParseArgs {
    fn execute(&self) -> Result<()> {
        let payload = parse_payload(&self.data);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }
        match payload {
            QrPayload::WorkshopCard {
                session_id,
                card_id,
                element_id,
                timestamp,
            } => {
                println!("Workshop card payload");
                println!("  Session: {session_id}");
                println!("  Card: {card_id}");
                if let Some(element) = element_id {
                    println!("  Element: {element}");
                }
                println!("  Timestamp: {timestamp}");
            }
            QrPayload::External { data } => {
                println!("External payload");
                println!("  Data: {data}");
            }
        }
        Ok(())
    }
}
