//! Configuration module for the Hotel Migrator.
//! Defines the settings read from the environment and the dependencies built from them.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{ConnectionSettings, Settings, DEFAULT_SOURCE_FILE};
