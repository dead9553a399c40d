//! # Hotel Migrator Shared
//! This crate defines shared data structures and types used across the hotel migrator.
//! It includes the domain entities (categories, chains, hotels), the typed shape of a
//! raw source record, and the per-phase reports returned by a migration run.
pub mod types;

pub use types::{
    Category, Chain, Dimension, DimensionKind, Hotel, HotelRecord, InsertOutcome,
    MigrationReport, Phase, PhaseReport,
};
