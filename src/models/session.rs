//! Workshop sessions, participants, and scanned responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::models::card::Card;

/// Lifecycle state of a workshop session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Being prepared, cards not yet handed out
    #[default]
    Draft,
    /// Workshop running, responses being collected
    Active,
    /// Workshop finished
    Completed,
}

/// One workshop run: a card template, its participants, and the responses
/// scanned from printed cards.
///
/// A session owns its responses; responses cannot outlive or move between
/// sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopSession {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Card snapshot used for this session
    pub card_template: Card,
    /// Ordered participant roster
    pub participants: Vec<Participant>,
    /// Ordered scanned responses
    pub responses: Vec<ParticipantResponse>,
    /// Lifecycle state
    pub status: SessionStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller provides when creating a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Card snapshot used for this session
    pub card_template: Card,
    /// Initial lifecycle state
    pub status: SessionStatus,
}

impl WorkshopSession {
    /// Materializes a new session with an empty roster and no responses.
    #[must_use]
    pub fn create(new: NewSession, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            card_template: new.card_template,
            participants: Vec::new(),
            responses: Vec::new(),
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a stored session. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    /// New display name, if changing
    pub name: Option<String>,
    /// New description, if changing
    pub description: Option<String>,
    /// Replacement card snapshot, if changing
    pub card_template: Option<Card>,
    /// New lifecycle state, if changing
    pub status: Option<SessionStatus>,
}

impl WorkshopSession {
    /// Applies a partial update and refreshes `updated_at`.
    pub fn apply(&mut self, update: SessionUpdate, clock: &dyn Clock) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(card_template) = update.card_template {
            self.card_template = card_template;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = clock.now();
    }
}

/// Someone attending a workshop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional contact address
    pub email: Option<String>,
    /// When the participant joined the session
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Creates a participant joining now.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Option<String>, clock: &dyn Clock) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email,
            joined_at: clock.now(),
        }
    }
}

/// One scanned card's worth of participant input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    /// Opaque unique identifier
    pub id: String,
    /// Submitting participant
    pub participant_id: String,
    /// Owning session
    pub session_id: String,
    /// Card the response was scanned from
    pub card_id: String,
    /// Per-element scanned values
    pub element_responses: Vec<ElementResponse>,
    /// When the card was scanned
    pub scanned_at: DateTime<Utc>,
    /// When detection finished processing, if it has
    pub processed_at: Option<DateTime<Utc>>,
}

/// Fields the external detector provides for a response; id and `scanned_at`
/// are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewResponse {
    /// Submitting participant
    pub participant_id: String,
    /// Owning session
    pub session_id: String,
    /// Card the response was scanned from
    pub card_id: String,
    /// Per-element scanned values
    pub element_responses: Vec<ElementResponse>,
    /// When detection finished processing, if it has
    pub processed_at: Option<DateTime<Utc>>,
}

/// Scanned value for one element of the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementResponse {
    /// Element the value belongs to
    pub element_id: String,
    /// Element type as reported by the detector
    pub element_type: String,
    /// Value printed on the card before the participant wrote on it
    pub original_value: String,
    /// Raw detected text, if any
    pub scanned_value: Option<String>,
    /// Cleaned-up value, if post-processing ran
    pub processed_value: Option<String>,
    /// Detector confidence in `[0, 1]`; absent when not computed
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_create_session_starts_empty() {
        let clock = FixedClock::at("2024-03-01T12:00:00Z");
        let session = WorkshopSession::create(
            NewSession {
                name: "Retro".to_string(),
                description: String::new(),
                card_template: Card::new("Card", &clock),
                status: SessionStatus::Draft,
            },
            &clock,
        );
        assert!(session.participants.is_empty());
        assert!(session.responses.is_empty());
        assert_eq!(session.status, SessionStatus::Draft);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(SessionStatus::Active).unwrap();
        assert_eq!(json, "active");
        let back: SessionStatus = serde_json::from_value(json).unwrap();
        assert_eq!(back, SessionStatus::Active);
    }

    #[test]
    fn test_apply_updates_status_only() {
        let created = FixedClock::at("2024-03-01T12:00:00Z");
        let later = FixedClock::at("2024-03-05T12:00:00Z");
        let mut session = WorkshopSession::create(
            NewSession {
                name: "Retro".to_string(),
                description: "spring".to_string(),
                card_template: Card::new("Card", &created),
                status: SessionStatus::Draft,
            },
            &created,
        );

        session.apply(
            SessionUpdate {
                status: Some(SessionStatus::Active),
                ..SessionUpdate::default()
            },
            &later,
        );

        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.description, "spring");
        assert_eq!(session.updated_at, later.now());
    }
}
