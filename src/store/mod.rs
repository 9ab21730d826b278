//! Keyed persistence of card templates and workshop sessions.
//!
//! `DataStore` is the single owner of persisted state. It speaks to a
//! [`StorageBackend`] for raw key/value access and stamps records through an
//! injected [`Clock`], so its behavior is deterministic under test.
//!
//! Lookup misses are reported as `None`/`false` return values, never as
//! errors; errors are reserved for I/O failures and malformed documents.

pub mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::constants::{CURRENT_SESSION_KEY, EXPORT_VERSION, SESSIONS_KEY, TEMPLATES_KEY};
use crate::models::{
    CardTemplate, NewResponse, NewSession, NewTemplate, Participant, ParticipantResponse,
    SessionUpdate, TemplateUpdate, WorkshopSession,
};

/// Counts reported by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    /// Templates added (records with already-known ids are skipped)
    pub templates_imported: usize,
    /// Sessions added (records with already-known ids are skipped)
    pub sessions_imported: usize,
}

/// Serialized shape of the full-export blob.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportBlob {
    #[serde(default)]
    templates: Vec<CardTemplate>,
    #[serde(default)]
    sessions: Vec<WorkshopSession>,
    exported_at: DateTime<Utc>,
    version: String,
}

/// Process-local store for templates and sessions.
///
/// Writes replace the whole collection under one key, so concurrent
/// unprotected writers risk lost updates; callers must serialize access
/// externally.
pub struct DataStore<B, C> {
    backend: B,
    clock: C,
}

impl<B: StorageBackend, C: Clock> DataStore<B, C> {
    /// Creates a store over the given backend and clock.
    pub const fn new(backend: B, clock: C) -> Self {
        Self { backend, clock }
    }

    // ------------------------------------------------------------------
    // Template management
    // ------------------------------------------------------------------

    /// Stores a new template, assigning its id and timestamps. The embedded
    /// card is snapshotted as-is; later edits to the caller's card do not
    /// reach the stored template.
    pub fn save_template(&mut self, new: NewTemplate) -> Result<CardTemplate> {
        let mut templates = self.templates()?;
        let template = CardTemplate::create(new, &self.clock);
        templates.push(template.clone());
        self.write_templates(&templates)?;
        Ok(template)
    }

    /// Returns all stored templates in insertion order.
    pub fn templates(&self) -> Result<Vec<CardTemplate>> {
        self.read_collection(TEMPLATES_KEY)
    }

    /// Looks up one template by id.
    pub fn template(&self, id: &str) -> Result<Option<CardTemplate>> {
        Ok(self.templates()?.into_iter().find(|t| t.id == id))
    }

    /// Merges a partial update into the template with the given id and
    /// refreshes its `updated_at`. Returns `None` if the id is unknown.
    pub fn update_template(
        &mut self,
        id: &str,
        update: TemplateUpdate,
    ) -> Result<Option<CardTemplate>> {
        let mut templates = self.templates()?;
        let Some(template) = templates.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        template.apply(update, &self.clock);
        let updated = template.clone();
        self.write_templates(&templates)?;
        Ok(Some(updated))
    }

    /// Removes the template with the given id. Returns `true` iff a record
    /// was removed.
    pub fn delete_template(&mut self, id: &str) -> Result<bool> {
        let mut templates = self.templates()?;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == before {
            return Ok(false);
        }
        self.write_templates(&templates)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Session management
    // ------------------------------------------------------------------

    /// Stores a new session with an empty roster, assigning its id and
    /// timestamps.
    pub fn create_session(&mut self, new: NewSession) -> Result<WorkshopSession> {
        let mut sessions = self.sessions()?;
        let session = WorkshopSession::create(new, &self.clock);
        sessions.push(session.clone());
        self.write_sessions(&sessions)?;
        Ok(session)
    }

    /// Returns all stored sessions in insertion order.
    pub fn sessions(&self) -> Result<Vec<WorkshopSession>> {
        self.read_collection(SESSIONS_KEY)
    }

    /// Looks up one session by id.
    pub fn session(&self, id: &str) -> Result<Option<WorkshopSession>> {
        Ok(self.sessions()?.into_iter().find(|s| s.id == id))
    }

    /// Merges a partial update into the session with the given id and
    /// refreshes its `updated_at`. Returns `None` if the id is unknown.
    pub fn update_session(
        &mut self,
        id: &str,
        update: SessionUpdate,
    ) -> Result<Option<WorkshopSession>> {
        let mut sessions = self.sessions()?;
        let Some(session) = sessions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        session.apply(update, &self.clock);
        let updated = session.clone();
        self.write_sessions(&sessions)?;
        Ok(Some(updated))
    }

    /// Removes the session with the given id (and the responses it owns).
    /// Returns `true` iff a record was removed.
    pub fn delete_session(&mut self, id: &str) -> Result<bool> {
        let mut sessions = self.sessions()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Ok(false);
        }
        self.write_sessions(&sessions)?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Current session pointer
    // ------------------------------------------------------------------

    /// Marks a session as the current one.
    pub fn set_current_session(&mut self, session_id: &str) -> Result<()> {
        let value = serde_json::to_string(session_id)?;
        self.backend.set(CURRENT_SESSION_KEY, &value)
    }

    /// Returns the current session, if one is set and still exists.
    pub fn current_session(&self) -> Result<Option<WorkshopSession>> {
        let Some(raw) = self.backend.get(CURRENT_SESSION_KEY)? else {
            return Ok(None);
        };
        let session_id: String =
            serde_json::from_str(&raw).context("Malformed current-session pointer")?;
        self.session(&session_id)
    }

    /// Clears the current-session pointer.
    pub fn clear_current_session(&mut self) -> Result<()> {
        self.backend.remove(CURRENT_SESSION_KEY)
    }

    // ------------------------------------------------------------------
    // Participants and responses
    // ------------------------------------------------------------------

    /// Adds a participant to a session's roster.
    ///
    /// Returns `None` when the session does not exist; this is a reported,
    /// non-fatal condition.
    pub fn add_participant(
        &mut self,
        session_id: &str,
        name: &str,
        email: Option<String>,
    ) -> Result<Option<Participant>> {
        let mut sessions = self.sessions()?;
        let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) else {
            return Ok(None);
        };
        let participant = Participant::new(name, email, &self.clock);
        session.participants.push(participant.clone());
        session.updated_at = self.clock.now();
        self.write_sessions(&sessions)?;
        Ok(Some(participant))
    }

    /// Appends a scanned response to its session, assigning its id and
    /// `scanned_at`.
    ///
    /// Returns `None` when the referenced session does not exist.
    pub fn add_response(&mut self, new: NewResponse) -> Result<Option<ParticipantResponse>> {
        let mut sessions = self.sessions()?;
        let Some(session) = sessions.iter_mut().find(|s| s.id == new.session_id) else {
            return Ok(None);
        };
        let response = ParticipantResponse {
            id: Uuid::new_v4().to_string(),
            participant_id: new.participant_id,
            session_id: new.session_id,
            card_id: new.card_id,
            element_responses: new.element_responses,
            scanned_at: self.clock.now(),
            processed_at: new.processed_at,
        };
        session.responses.push(response.clone());
        session.updated_at = self.clock.now();
        self.write_sessions(&sessions)?;
        Ok(Some(response))
    }

    /// Returns a session's responses, or an empty list when the session is
    /// unknown.
    pub fn session_responses(&self, session_id: &str) -> Result<Vec<ParticipantResponse>> {
        Ok(self
            .session(session_id)?
            .map(|s| s.responses)
            .unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Serializes every template and session into one versioned blob.
    pub fn export_all(&self) -> Result<String> {
        let blob = ExportBlob {
            templates: self.templates()?,
            sessions: self.sessions()?,
            exported_at: self.clock.now(),
            version: EXPORT_VERSION.to_string(),
        };
        serde_json::to_string_pretty(&blob).context("Failed to serialize export blob")
    }

    /// Serializes one session as pretty JSON. Returns `None` for an unknown
    /// id.
    pub fn export_session(&self, session_id: &str) -> Result<Option<String>> {
        match self.session(session_id)? {
            Some(session) => Ok(Some(serde_json::to_string_pretty(&session)?)),
            None => Ok(None),
        }
    }

    /// Imports a blob produced by [`Self::export_all`].
    ///
    /// Import is additive and idempotent by id: a record whose id already
    /// exists is skipped and not counted. A malformed blob fails before any
    /// write, leaving the store untouched.
    pub fn import_all(&mut self, blob: &str) -> Result<ImportReport> {
        let parsed: ExportBlob =
            serde_json::from_str(blob).context("Invalid data format")?;

        let mut report = ImportReport::default();

        let mut templates = self.templates()?;
        for template in parsed.templates {
            if !templates.iter().any(|t| t.id == template.id) {
                templates.push(template);
                report.templates_imported += 1;
            }
        }

        let mut sessions = self.sessions()?;
        for session in parsed.sessions {
            if !sessions.iter().any(|s| s.id == session.id) {
                sessions.push(session);
                report.sessions_imported += 1;
            }
        }

        self.write_templates(&templates)?;
        self.write_sessions(&sessions)?;
        Ok(report)
    }

    /// Removes every stored collection and the current-session pointer.
    pub fn clear_all(&mut self) -> Result<()> {
        self.backend.remove(TEMPLATES_KEY)?;
        self.backend.remove(SESSIONS_KEY)?;
        self.backend.remove(CURRENT_SESSION_KEY)
    }

    // ------------------------------------------------------------------
    // Backend plumbing
    // ------------------------------------------------------------------

    fn read_collection<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Malformed document under key '{key}'")),
            None => Ok(Vec::new()),
        }
    }

    fn write_templates(&mut self, templates: &[CardTemplate]) -> Result<()> {
        let raw = serde_json::to_string(templates)?;
        self.backend.set(TEMPLATES_KEY, &raw)
    }

    fn write_sessions(&mut self, sessions: &[WorkshopSession]) -> Result<()> {
        let raw = serde_json::to_string(sessions)?;
        self.backend.set(SESSIONS_KEY, &raw)
    }
}
