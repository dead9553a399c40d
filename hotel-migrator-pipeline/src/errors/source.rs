//! Error types for the source module of the Hotel Migrator Pipeline.
//! Every source error is fatal: no partially read document is ever migrated.
use std::path::PathBuf;

use thiserror::Error;

/// Represents errors that can occur while reading the source document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Error reading source file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in source document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unexpected source document shape: {0}")]
    InvalidShape(String),
}
