//! This module defines the `BatchLoader` struct responsible for writing validated
//! categories, chains and hotels to the inventory repository.
//! It acts as an interface between the processing pipeline and the data storage.
pub use crate::errors::LoaderError;
pub use hotel_migrator_repository::{InventoryRepository, InventoryRepositoryError};
use hotel_migrator_shared::{Category, Chain, Hotel, InsertOutcome};
use std::sync::Arc;

/// `BatchLoader` persists one phase at a time.
///
/// It utilizes an `InventoryRepository` to interact with the underlying data store.
/// Each load call maps to exactly one repository transaction, so a failed call
/// leaves nothing of its batch behind.
pub struct BatchLoader {
    pub inventory_repository: Arc<dyn InventoryRepository>,
}

impl BatchLoader {
    /// Creates a new `BatchLoader` instance.
    ///
    /// # Arguments
    ///
    /// * `inventory_repository` - An `Arc` trait object that implements
    ///   `InventoryRepository`, providing the interface for data persistence.
    ///
    /// # Returns
    ///
    /// A new `BatchLoader` instance.
    pub fn new(inventory_repository: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory_repository }
    }

    /// Makes sure the three inventory tables exist before anything is written.
    pub async fn prepare_storage(&self) -> Result<(), LoaderError> {
        self.inventory_repository.ensure_schema().await?;
        Ok(())
    }

    /// Writes categories whose id is not stored yet.
    ///
    /// # Returns
    ///
    /// How many rows were written and how many ids were already present.
    pub async fn load_categories(&self, categories: &[Category]) -> Result<InsertOutcome, LoaderError> {
        Ok(self.inventory_repository.insert_categories(categories).await?)
    }

    /// Writes chains whose id is not stored yet.
    pub async fn load_chains(&self, chains: &[Chain]) -> Result<InsertOutcome, LoaderError> {
        Ok(self.inventory_repository.insert_chains(chains).await?)
    }

    /// Writes every hotel or none of them.
    ///
    /// # Arguments
    ///
    /// * `hotels` - Hotels whose references were already checked against the
    ///   categories and chains of the same run.
    ///
    /// # Returns
    ///
    /// The number of hotels written, or a `LoaderError` if any row was refused.
    pub async fn load_hotels(&self, hotels: &[Hotel]) -> Result<usize, LoaderError> {
        Ok(self.inventory_repository.insert_hotels(hotels).await?)
    }

    /// Releases the repository connection.
    pub async fn release(&self) {
        self.inventory_repository.close().await;
    }
}
