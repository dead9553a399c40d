//! This module defines the `InventoryRepository` trait, the storage interface used
//! by the migration pipeline.
use hotel_migrator_shared::{Category, Chain, Hotel, InsertOutcome};

use crate::errors::InventoryRepositoryError;

/// A trait that defines the interface for the relational inventory store.
///
/// Reference tables (categories, chains) and the fact table (hotels) are
/// written with two deliberately different strategies: reference rows are
/// inserted only if absent, hotel rows are inserted strictly and a duplicate
/// id is an error. Every insert method runs as one transaction that either
/// commits the whole slice or none of it.
#[async_trait::async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Creates the category, chain and hotel tables with their keys if they do
    /// not exist yet. Safe to call on every run.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All three tables exist
    /// * `Err(InventoryRepositoryError::SchemaError)` - Storage is unreachable or the
    ///   statements were refused
    async fn ensure_schema(&self) -> Result<(), InventoryRepositoryError>;

    /// Inserts categories whose id is not stored yet; existing ids are left untouched.
    async fn insert_categories(
        &self,
        categories: &[Category],
    ) -> Result<InsertOutcome, InventoryRepositoryError>;

    /// Inserts chains whose id is not stored yet; existing ids are left untouched.
    async fn insert_chains(&self, chains: &[Chain]) -> Result<InsertOutcome, InventoryRepositoryError>;

    /// Inserts every hotel, failing the whole slice on the first rejected row.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of hotels written
    /// * `Err(InventoryRepositoryError::IntegrityViolation)` - A hotel id already exists
    ///   or a reference points at a missing category/chain; nothing was written
    async fn insert_hotels(&self, hotels: &[Hotel]) -> Result<usize, InventoryRepositoryError>;

    /// Resolves the stored names of a category and a chain.
    ///
    /// A `None` id or an id that is not stored resolves to `None`.
    async fn dimension_names(
        &self,
        category_id: Option<&str>,
        chain_id: Option<&str>,
    ) -> Result<(Option<String>, Option<String>), InventoryRepositoryError>;

    /// Releases the underlying storage connection. Idempotent.
    async fn close(&self);
}
