//! Error types for the orchestrator module of the Hotel Migrator Pipeline.
//! Each variant names the stage at which a migration run was aborted.
use hotel_migrator_shared::Phase;
use thiserror::Error;

use crate::errors::{LoaderError, SourceError};

/// Represents errors that abort a migration run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Schema error: {0}")]
    Schema(#[source] LoaderError),
    #[error("Load phase `{phase}` failed: {source}")]
    Load {
        phase: Phase,
        #[source]
        source: LoaderError,
    },
}

impl OrchestratorError {
    /// The load phase that failed, if the run got that far.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            OrchestratorError::Load { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
