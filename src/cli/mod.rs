//! CLI command handlers for Cardcraft.
//!
//! This module provides headless, scriptable access to the core: template
//! and session management, print-layout previews, analytics, QR payload
//! handling, and data export/import.

pub mod analytics;
pub mod data;
pub mod print;
pub mod scan;
pub mod session;
pub mod template;

// Re-export types used by main.rs and tests
pub use analytics::AnalyticsArgs;
pub use data::DataArgs;
pub use print::PrintArgs;
pub use scan::ScanArgs;
pub use session::SessionArgs;
pub use template::TemplateArgs;

use crate::clock::SystemClock;
use crate::store::{DataStore, FileBackend};

/// Store type the CLI operates on.
pub type CliStore = DataStore<FileBackend, SystemClock>;
