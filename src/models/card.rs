//! Card canvas and its element collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::models::element::{CardElement, ElementUpdate, Size};

/// A fixed-size canvas holding positioned elements, at design scale.
///
/// The element collection keeps insertion order; that order is the default
/// z-order when `z_index` values tie. Every mutation refreshes `updated_at`
/// through the injected clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Opaque unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Canvas dimensions in card-local units
    pub size: Size,
    /// Canvas fill color (CSS color string)
    pub background_color: String,
    /// Ordered element collection
    pub elements: Vec<CardElement>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates an empty card with the designer's default canvas (400x600,
    /// white background).
    #[must_use]
    pub fn new(name: impl Into<String>, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size: Size::new(400.0, 600.0),
            background_color: "#ffffff".to_string(),
            elements: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends an element and refreshes `updated_at`.
    pub fn add_element(&mut self, element: CardElement, clock: &dyn Clock) {
        self.elements.push(element);
        self.touch(clock);
    }

    /// Removes the element with the given id.
    ///
    /// Returns `true` iff an element was removed. Refreshes `updated_at`
    /// only when something changed.
    pub fn remove_element(&mut self, element_id: &str, clock: &dyn Clock) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != element_id);
        let removed = self.elements.len() != before;
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Applies a partial update to the element with the given id.
    ///
    /// Returns `true` iff the element exists. Unrelated elements and fields
    /// are left untouched.
    pub fn update_element(
        &mut self,
        element_id: &str,
        update: ElementUpdate,
        clock: &dyn Clock,
    ) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == element_id) else {
            return false;
        };
        element.apply(update);
        self.touch(clock);
        true
    }

    /// Applies a partial update to the card's own metadata.
    pub fn apply(&mut self, update: CardUpdate, clock: &dyn Clock) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(background_color) = update.background_color {
            self.background_color = background_color;
        }
        self.touch(clock);
    }

    /// Returns references to the elements in paint order: ascending
    /// `z_index`, insertion order breaking ties (stable sort).
    #[must_use]
    pub fn elements_in_paint_order(&self) -> Vec<&CardElement> {
        let mut ordered: Vec<&CardElement> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Looks up an element by id.
    #[must_use]
    pub fn element(&self, element_id: &str) -> Option<&CardElement> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    /// Refreshes the modification timestamp.
    fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = clock.now();
    }
}

/// Partial update for a card's metadata. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    /// New display name, if changing
    pub name: Option<String>,
    /// New canvas size, if changing
    pub size: Option<Size>,
    /// New canvas fill color, if changing
    pub background_color: Option<String>,
}
