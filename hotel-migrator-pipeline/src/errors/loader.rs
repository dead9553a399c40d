//! Error types for the loader module of the Hotel Migrator Pipeline.
//! Defines specific errors that can occur while writing entities to storage.
use hotel_migrator_repository::InventoryRepositoryError;
use thiserror::Error;

/// Represents errors that can occur within the batch loader.
///
/// This enum consolidates error conditions raised while persisting a phase,
/// including errors propagated from the inventory repository.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Inventory repository error: {0}")]
    InventoryRepository(#[from] InventoryRepositoryError),
}
