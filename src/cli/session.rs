//! Workshop session management commands.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::cli::CliStore;
use crate::clock::SystemClock;
use crate::models::{Card, ElementResponse, NewResponse, NewSession, SessionStatus, SessionUpdate};

/// Manage workshop sessions
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum SessionCommand {
    /// List stored sessions
    List(ListArgs),
    /// Create a session
    Create(CreateArgs),
    /// Print one session as JSON
    Show(ShowArgs),
    /// Delete a session and the responses it owns
    Delete(DeleteArgs),
    /// Change a session's lifecycle status
    SetStatus(SetStatusArgs),
    /// Add a participant to a session's roster
    AddParticipant(AddParticipantArgs),
    /// Append a scanned response from a JSON file
    AddResponse(AddResponseArgs),
}

/// List stored sessions
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create a session
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Session name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Long description
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Template whose card this session uses; a fresh default card when
    /// omitted
    #[arg(short, long, value_name = "TEMPLATE_ID")]
    pub template: Option<String>,
}

/// Print one session as JSON
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Session id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Delete a session
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Session id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Change a session's lifecycle status
#[derive(Debug, Clone, Args)]
pub struct SetStatusArgs {
    /// Session id
    #[arg(value_name = "ID")]
    pub id: String,

    /// New status
    #[arg(value_enum, value_name = "STATUS")]
    pub status: StatusValue,
}

/// CLI-facing status values
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StatusValue {
    /// Being prepared
    Draft,
    /// Collecting responses
    Active,
    /// Finished
    Completed,
}

impl From<StatusValue> for SessionStatus {
    fn from(value: StatusValue) -> Self {
        match value {
            StatusValue::Draft => Self::Draft,
            StatusValue::Active => Self::Active,
            StatusValue::Completed => Self::Completed,
        }
    }
}

/// Add a participant to a session's roster
#[derive(Debug, Clone, Args)]
pub struct AddParticipantArgs {
    /// Session id
    #[arg(value_name = "SESSION_ID")]
    pub session_id: String,

    /// Participant name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Contact address
    #[arg(short, long, value_name = "EMAIL")]
    pub email: Option<String>,
}

/// Append a scanned response from a JSON file
#[derive(Debug, Clone, Args)]
pub struct AddResponseArgs {
    /// Session id
    #[arg(value_name = "SESSION_ID")]
    pub session_id: String,

    /// JSON file produced by the detector
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,
}

/// On-disk shape of a detector response file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseFile {
    participant_id: String,
    card_id: String,
    #[serde(default)]
    element_responses: Vec<ElementResponse>,
    processed_at: Option<DateTime<Utc>>,
}

impl SessionArgs {
    /// Execute the session command
    pub fn execute(&self, store: &mut CliStore) -> Result<()> {
        match &self.command {
            SessionCommand::List(args) => args.execute(store),
            SessionCommand::Create(args) => args.execute(store),
            SessionCommand::Show(args) => args.execute(store),
            SessionCommand::Delete(args) => args.execute(store),
            SessionCommand::SetStatus(args) => args.execute(store),
            SessionCommand::AddParticipant(args) => args.execute(store),
            SessionCommand::AddResponse(args) => args.execute(store),
        }
    }
}

impl ListArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        let sessions = store.sessions()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&sessions)?);
            return Ok(());
        }

        if sessions.is_empty() {
            println!("No sessions found.");
            return Ok(());
        }
        println!("Stored sessions ({}):\n", sessions.len());
        for session in &sessions {
            println!("  {} [{}]", session.name, session.id);
            println!(
                "    Status: {} | Participants: {} | Responses: {}",
                match session.status {
                    SessionStatus::Draft => "draft",
                    SessionStatus::Active => "active",
                    SessionStatus::Completed => "completed",
                },
                session.participants.len(),
                session.responses.len()
            );
            println!();
        }
        Ok(())
    }
}

impl CreateArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        let card = match &self.template {
            Some(template_id) => {
                let Some(template) = store.template(template_id)? else {
                    bail!("Template not found: {template_id}");
                };
                template.card
            }
            None => Card::new(self.name.clone(), &SystemClock),
        };

        let session = store.create_session(NewSession {
            name: self.name.clone(),
            description: self.description.clone(),
            card_template: card,
            status: SessionStatus::Draft,
        })?;

        println!("Created session '{}' with id {}", session.name, session.id);
        Ok(())
    }
}

impl ShowArgs {
    fn execute(&self, store: &CliStore) -> Result<()> {
        match store.export_session(&self.id)? {
            Some(json) => {
                println!("{json}");
                Ok(())
            }
            None => bail!("Session not found: {}", self.id),
        }
    }
}

impl DeleteArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        if store.delete_session(&self.id)? {
            println!("Deleted session {}", self.id);
            Ok(())
        } else {
            bail!("Session not found: {}", self.id);
        }
    }
}

impl SetStatusArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        let update = SessionUpdate {
            status: Some(self.status.into()),
            ..SessionUpdate::default()
        };
        match store.update_session(&self.id, update)? {
            Some(session) => {
                println!("Session {} is now {:?}", session.id, session.status);
                Ok(())
            }
            None => bail!("Session not found: {}", self.id),
        }
    }
}

impl AddParticipantArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        match store.add_participant(&self.session_id, &self.name, self.email.clone())? {
            Some(participant) => {
                println!("Added participant '{}' [{}]", participant.name, participant.id);
                Ok(())
            }
            None => bail!("Session not found: {}", self.session_id),
        }
    }
}

impl AddResponseArgs {
    fn execute(&self, store: &mut CliStore) -> Result<()> {
        let contents = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let parsed: ResponseFile = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed response file {}", self.file.display()))?;

        let stored = store.add_response(NewResponse {
            participant_id: parsed.participant_id,
            session_id: self.session_id.clone(),
            card_id: parsed.card_id,
            element_responses: parsed.element_responses,
            processed_at: parsed.processed_at,
        })?;

        match stored {
            Some(response) => {
                println!(
                    "Recorded response {} ({} element values)",
                    response.id,
                    response.element_responses.len()
                );
                Ok(())
            }
            None => bail!("Session not found: {}", self.session_id),
        }
    }
}
