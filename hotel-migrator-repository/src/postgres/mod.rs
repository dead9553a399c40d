//! PostgreSQL implementation of the hotel migrator repository.
//!
//! ## Database Tables
//!
//! - `category`: hotel categories, keyed by their textual id
//! - `hotel_chain`: hotel chains, keyed by their textual id (`chain` is avoided
//!   as a table name so the schema ports to backends that reserve it)
//! - `hotel`: hotel properties, with nullable foreign keys to both tables above
mod inventory_repository;
pub mod schema;

pub use inventory_repository::PostgresInventoryRepository;
