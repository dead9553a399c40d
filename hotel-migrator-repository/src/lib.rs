//! # Hotel Migrator Repository
//! This crate provides the storage side of the hotel migration: the
//! `InventoryRepository` trait (schema management plus the two write strategies
//! used for reference and fact tables) and its PostgreSQL implementation.
pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::InventoryRepositoryError;
pub use interfaces::InventoryRepository;
pub use postgres::PostgresInventoryRepository;
