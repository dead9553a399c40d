//! Error types for the Hotel Migrator application.
//! Consolidates configuration failures with the errors of an aborted run.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration aborted: {0}")]
    Orchestrator(#[from] hotel_migrator_pipeline::errors::OrchestratorError),
}
