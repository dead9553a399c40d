mod category;
mod chain;
mod dimension;
mod hotel;
mod hotel_record;
mod report;

pub use category::Category;
pub use chain::Chain;
pub use dimension::{Dimension, DimensionKind};
pub use hotel::Hotel;
pub use hotel_record::{
    CoordinatesPayload, HotelRecord, LocationPayload, RawIdentifier, ReferencePayload,
};
pub use report::{InsertOutcome, MigrationReport, Phase, PhaseReport};
