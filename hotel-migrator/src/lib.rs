//! Hotel Migrator Library
//!
//! This library provides the application shell around the migration pipeline:
//! settings read from the environment, dependency wiring and the top-level
//! error type.

pub mod config;
pub mod errors;

pub use config::{ConnectionSettings, Dependencies, Settings};
pub use errors::MigrationError;
