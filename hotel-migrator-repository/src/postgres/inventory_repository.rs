use async_trait::async_trait;
use hotel_migrator_shared::{Category, Chain, Dimension, Hotel, InsertOutcome};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::{debug, info};

use crate::postgres::schema::{self, CATEGORY_TABLE, CHAIN_TABLE, HOTEL_TABLE};
use crate::{InventoryRepository, InventoryRepositoryError};

/// PostgreSQL implementation of the inventory repository.
///
/// The pool is expected to hold a single connection: a migration run is the
/// only writer and owns that connection until [`InventoryRepository::close`].
pub struct PostgresInventoryRepository {
    pool: sqlx::PgPool,
}

impl PostgresInventoryRepository {
    /// Wraps an existing pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Builds a single-connection pool that connects on first use.
    ///
    /// Nothing is dialed here, so a run that fails before touching storage
    /// never opens a connection.
    pub fn connect_lazy(options: PgConnectOptions) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy_with(options);
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }

    /// Inserts reference rows within an active transaction, skipping ids that
    /// are already stored.
    ///
    /// # Arguments
    ///
    /// * `table` - Reference table to write (`category` or `hotel_chain`)
    /// * `dimensions` - Rows to insert (empty slices are no-ops)
    /// * `tx` - Active transaction context
    async fn insert_dimensions_tx<D: Dimension>(
        &self,
        table: &'static str,
        dimensions: &[D],
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<InsertOutcome, InventoryRepositoryError> {
        let mut outcome = InsertOutcome::default();
        if dimensions.is_empty() {
            return Ok(outcome);
        }

        let statement = schema::insert_if_absent(table);
        for dimension in dimensions {
            let result = sqlx::query(&statement)
                .bind(dimension.id())
                .bind(dimension.name())
                .execute(&mut **tx)
                .await
                .map_err(|e| InventoryRepositoryError::from_row_write(e, table, dimension.id()))?;

            if result.rows_affected() == 0 {
                debug!(table, id = dimension.id(), "Row already present, left untouched");
                outcome.already_present += 1;
            } else {
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }

    /// Strictly inserts hotels within an active transaction.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of rows written
    /// * `Err(InventoryRepositoryError)` - First rejected row; the caller drops the
    ///   transaction, which rolls back the rows written before it
    async fn insert_hotels_tx(
        &self,
        hotels: &[Hotel],
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<usize, InventoryRepositoryError> {
        for hotel in hotels {
            sqlx::query(schema::INSERT_HOTEL)
                .bind(hotel.id)
                .bind(&hotel.name)
                .bind(hotel.category_id.as_deref())
                .bind(hotel.chain_id.as_deref())
                .bind(&hotel.location)
                .execute(&mut **tx)
                .await
                .map_err(|e| InventoryRepositoryError::from_row_write(e, HOTEL_TABLE, hotel.id))?;
        }
        Ok(hotels.len())
    }

    async fn lookup_name(
        &self,
        table: &'static str,
        id: Option<&str>,
    ) -> Result<Option<String>, InventoryRepositoryError> {
        let Some(id) = id else {
            return Ok(None);
        };

        let statement = schema::select_name(table);
        let name = sqlx::query_scalar::<_, String>(&statement)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn ensure_schema(&self) -> Result<(), InventoryRepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(InventoryRepositoryError::SchemaError)?;
        for statement in schema::CREATE_STATEMENTS {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(InventoryRepositoryError::SchemaError)?;
        }
        tx.commit()
            .await
            .map_err(InventoryRepositoryError::SchemaError)?;

        info!("Schema ready");
        Ok(())
    }

    async fn insert_categories(
        &self,
        categories: &[Category],
    ) -> Result<InsertOutcome, InventoryRepositoryError> {
        let mut tx = self.pool.begin().await?;
        let outcome = self
            .insert_dimensions_tx(CATEGORY_TABLE, categories, &mut tx)
            .await?;
        tx.commit().await?;
        Ok(outcome)
    }

    async fn insert_chains(&self, chains: &[Chain]) -> Result<InsertOutcome, InventoryRepositoryError> {
        let mut tx = self.pool.begin().await?;
        let outcome = self.insert_dimensions_tx(CHAIN_TABLE, chains, &mut tx).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    async fn insert_hotels(&self, hotels: &[Hotel]) -> Result<usize, InventoryRepositoryError> {
        if hotels.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let inserted = self.insert_hotels_tx(hotels, &mut tx).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    async fn dimension_names(
        &self,
        category_id: Option<&str>,
        chain_id: Option<&str>,
    ) -> Result<(Option<String>, Option<String>), InventoryRepositoryError> {
        let category = self.lookup_name(CATEGORY_TABLE, category_id).await?;
        let chain = self.lookup_name(CHAIN_TABLE, chain_id).await?;
        Ok((category, chain))
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!("Storage connection released");
        }
    }
}
