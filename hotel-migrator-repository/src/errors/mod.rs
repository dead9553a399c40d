//! Error types for the hotel migrator repository.
//! Consolidates and re-exports error types related to inventory storage operations.
mod inventory;

pub use inventory::InventoryRepositoryError;
