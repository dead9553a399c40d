//! # Hotel Migrator Pipeline
//! This crate defines the extraction-validation-load pipeline that moves a JSON
//! hotel inventory into relational storage.
//!
//! 1. **Source**: reads the JSON document and yields its records in order
//! 2. **Processor**: extracts deduplicated categories, chains and hotels, then
//!    filters out entities with unusable identifiers
//! 3. **Loader**: writes the survivors in foreign-key order, one transaction per
//!    entity collection
//! 4. **Orchestrator**: sequences the above and always releases storage
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod source;

pub mod errors;
