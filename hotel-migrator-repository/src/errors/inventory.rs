//! Error types for the inventory repository.
//! Defines specific errors that can occur during database operations on the
//! category, chain and hotel tables.
use thiserror::Error;

/// Represents errors that can occur within the inventory repository.
///
/// Schema failures are kept apart from data-phase failures so callers can
/// tell "storage is not usable" from "this batch was rejected".
#[derive(Debug, Error)]
pub enum InventoryRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Schema error: {0}")]
    SchemaError(#[source] sqlx::Error),

    #[error("Integrity violation on {table} for id {key}: {message}")]
    IntegrityViolation {
        table: &'static str,
        key: String,
        message: String,
    },
}

impl InventoryRepositoryError {
    /// Classifies a failed row write.
    ///
    /// Unique and foreign-key violations become `IntegrityViolation`; every
    /// other failure stays a plain database error.
    pub fn from_row_write(error: sqlx::Error, table: &'static str, key: impl ToString) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() || db_error.is_foreign_key_violation() {
                return Self::IntegrityViolation {
                    table,
                    key: key.to_string(),
                    message: db_error.message().to_string(),
                };
            }
        }
        Self::DatabaseError(error)
    }

    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::IntegrityViolation { .. })
    }
}
