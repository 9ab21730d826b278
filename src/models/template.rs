//! Reusable card templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::models::card::Card;

/// A named, categorized snapshot of a card.
///
/// The embedded card is a deep copy taken at save time; later edits to the
/// live card do not reach a saved template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Snapshotted card
    pub card: Card,
    /// Organizational category (e.g. "feedback", "icebreaker")
    pub category: String,
    /// Searchable keywords
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
    /// Whether the template is shared publicly
    pub is_public: bool,
}

/// Fields the caller provides when saving a template; id and timestamps are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    /// Display name
    pub name: String,
    /// Long description
    pub description: String,
    /// Card to snapshot
    pub card: Card,
    /// Organizational category
    pub category: String,
    /// Searchable keywords
    pub tags: Vec<String>,
    /// Whether the template is shared publicly
    pub is_public: bool,
}

impl CardTemplate {
    /// Materializes a new template from caller-provided fields.
    #[must_use]
    pub fn create(new: NewTemplate, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            card: new.card,
            category: new.category,
            tags: new.tags,
            created_at: now,
            updated_at: now,
            is_public: new.is_public,
        }
    }
}

/// Partial update for a stored template. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    /// New display name, if changing
    pub name: Option<String>,
    /// New description, if changing
    pub description: Option<String>,
    /// Replacement card snapshot, if changing
    pub card: Option<Card>,
    /// New category, if changing
    pub category: Option<String>,
    /// Replacement tag list, if changing
    pub tags: Option<Vec<String>>,
    /// New visibility, if changing
    pub is_public: Option<bool>,
}

impl CardTemplate {
    /// Applies a partial update and refreshes `updated_at`.
    pub fn apply(&mut self, update: TemplateUpdate, clock: &dyn Clock) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(card) = update.card {
            self.card = card;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        self.updated_at = clock.now();
    }
}
