//! Card element geometry and identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::properties::{ElementProperties, ElementType};

/// Top-left offset of an element in card-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    /// Horizontal offset from the card's left edge (non-negative)
    pub x: f64,
    /// Vertical offset from the card's top edge (non-negative)
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in card-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width (positive)
    pub width: f64,
    /// Height (positive)
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One positioned visual unit on a card.
///
/// The `properties` union carries the type tag, so an element's type and its
/// property shape cannot disagree. Serialized form matches the card JSON:
/// `type` and `properties` appear as sibling fields of the element object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardElement {
    /// Opaque unique identifier
    pub id: String,
    /// Top-left offset in card-local units
    pub position: Position,
    /// Element extent in card-local units
    pub size: Size,
    /// Paint order, low to high; ties keep insertion order
    pub z_index: i32,
    /// Type-tagged property set
    #[serde(flatten)]
    pub properties: ElementProperties,
}

impl CardElement {
    /// Creates an element of the given type at the given position, with the
    /// type's default size and default property set.
    #[must_use]
    pub fn with_defaults(element_type: ElementType, position: Position) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position,
            size: Self::default_size(element_type),
            z_index: 0,
            properties: ElementProperties::default_for(element_type),
        }
    }

    /// Returns this element's type.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.properties.element_type()
    }

    /// Default canvas footprint per element type.
    #[must_use]
    pub const fn default_size(element_type: ElementType) -> Size {
        match element_type {
            ElementType::NameLabel => Size::new(120.0, 30.0),
            ElementType::TextField => Size::new(200.0, 40.0),
            ElementType::TextArea => Size::new(200.0, 80.0),
            ElementType::Table => Size::new(250.0, 150.0),
            ElementType::Icon => Size::new(40.0, 40.0),
            ElementType::QrCode => Size::new(100.0, 100.0),
        }
    }

    /// Applies a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, update: ElementUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(z_index) = update.z_index {
            self.z_index = z_index;
        }
        if let Some(properties) = update.properties {
            self.properties = properties;
        }
    }
}

/// Partial update for one element. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct ElementUpdate {
    /// New position, if changing
    pub position: Option<Position>,
    /// New size, if changing
    pub size: Option<Size>,
    /// New paint order, if changing
    pub z_index: Option<i32>,
    /// Replacement property set, if changing
    pub properties: Option<ElementProperties>,
}
