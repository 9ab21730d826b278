//! Workshop Card Toolkit
//!
//! This library provides core functionality for composing workshop cards,
//! persisting reusable templates and sessions, computing print-page layouts,
//! and aggregating scanned participant responses.

// Module declarations
pub mod analytics;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod models;
pub mod print;
pub mod scan;
pub mod store;
