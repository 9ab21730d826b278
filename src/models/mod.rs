//! Data models for cards, elements, templates, and workshop sessions.
//!
//! This module contains all the core data structures used throughout the
//! application. Models are designed to be independent of storage and layout
//! logic.

pub mod card;
pub mod element;
pub mod properties;
pub mod session;
pub mod template;

// Re-export all model types
pub use card::{Card, CardUpdate};
pub use element::{CardElement, ElementUpdate, Position, Size};
pub use properties::{
    ElementProperties, ElementType, ErrorCorrectionLevel, FontWeight, IconName, IconProperties,
    NameLabelProperties, QrCodeProperties, TableProperties, TextAreaProperties,
    TextFieldProperties,
};
pub use session::{
    ElementResponse, NewResponse, NewSession, Participant, ParticipantResponse, SessionStatus,
    SessionUpdate, WorkshopSession,
};
pub use template::{CardTemplate, NewTemplate, TemplateUpdate};
