//! Processor module for the hotel migrator pipeline.
//!
//! Turns raw source records into entities that are safe to load: the
//! extractor builds deduplicated categories, chains and hotels, and the
//! validator drops every entity whose identifiers are not non-negative
//! integers. Neither stage ever fails a run; both shrink the batch and
//! report why.
mod extractor;
mod validator;

pub use extractor::{
    EntityExtractor, ExtractedInventory, Extraction, ExtractionDiagnostics, ExtractionIssue,
    RecordOutcome,
};
pub use validator::{
    IdentifierIssue, Validated, ValidationReport, parse_identifier, validate_categories,
    validate_chains, validate_dimensions, validate_hotels,
};
