//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the storage key namespace.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Cardcraft";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "cardcraft";

/// Storage key for the card template collection.
pub const TEMPLATES_KEY: &str = "workshop-cards-templates";

/// Storage key for the workshop session collection.
pub const SESSIONS_KEY: &str = "workshop-cards-sessions";

/// Storage key for the current session pointer.
pub const CURRENT_SESSION_KEY: &str = "workshop-cards-current-session";

/// Schema version written into export blobs.
pub const EXPORT_VERSION: &str = "1.0";
