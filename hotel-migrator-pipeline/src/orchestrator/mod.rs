//! This module defines the `Orchestrator` responsible for coordinating a
//! migration run.
//! It integrates the record source, entity extractor, validator and batch loader
//! and owns the success/failure contract of the whole run.
use std::path::Path;

use hotel_migrator_shared::{
    Category, Chain, Hotel, InsertOutcome, MigrationReport, Phase, PhaseReport,
};
use tracing::{info, instrument, warn};

use crate::errors::OrchestratorError;
use crate::loader::BatchLoader;
use crate::processor::{
    validate_categories, validate_chains, validate_hotels, EntityExtractor, Extraction,
    ExtractionDiagnostics, Validated, ValidationReport,
};
use crate::source::{JsonFileSource, JsonTextSource, RecordSource};

/// `Orchestrator` runs one migration from a source document to storage.
///
/// Phases run strictly in order (categories, chains, hotels), each in its own
/// transaction. A failed phase aborts the run but leaves the phases that
/// already committed in place. The loader's connection is released when the
/// run ends, whatever the outcome, so an orchestrator is consumed by its run;
/// a rerun needs a new one over a new connection.
pub struct Orchestrator {
    pub extractor: EntityExtractor,
    pub loader: BatchLoader,
}

/// Entities that survived extraction and validation, with the diagnostics
/// that go into each phase report.
struct PreparedInventory {
    categories: Validated<Category>,
    chains: Validated<Chain>,
    hotels: Validated<Hotel>,
    reports: [PhaseReport; 3],
}

impl Orchestrator {
    /// Creates a new `Orchestrator` instance.
    ///
    /// # Arguments
    ///
    /// * `loader` - The `BatchLoader` whose repository receives the entities
    ///
    /// # Returns
    ///
    /// A new `Orchestrator` instance.
    pub fn new(loader: BatchLoader) -> Self {
        Self {
            extractor: EntityExtractor::new(),
            loader,
        }
    }

    /// Migrates the JSON document at `path`.
    pub async fn run_file(self, path: impl AsRef<Path>) -> Result<MigrationReport, OrchestratorError> {
        self.run(&JsonFileSource::new(path.as_ref())).await
    }

    /// Migrates a JSON document held in memory.
    pub async fn run_json(self, text: &str) -> Result<MigrationReport, OrchestratorError> {
        self.run(&JsonTextSource::new(text)).await
    }

    /// Runs the migration end to end.
    ///
    /// # Arguments
    ///
    /// * `source` - The `RecordSource` providing the raw records
    ///
    /// # Returns
    ///
    /// * `Ok(MigrationReport)` - Schema creation and all three phases committed
    /// * `Err(OrchestratorError)` - The run was aborted; the error names the stage
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub async fn run(self, source: &dyn RecordSource) -> Result<MigrationReport, OrchestratorError> {
        let result = self.migrate(source).await;
        self.loader.release().await;

        match &result {
            Ok(report) => {
                for phase in report.phases() {
                    info!(
                        phase = %phase.phase,
                        extracted = phase.extracted,
                        inserted = phase.inserted,
                        skipped = phase.skipped,
                        duplicates = phase.duplicates,
                        "Phase committed"
                    );
                }
                info!("Migration completed");
            }
            Err(e) => warn!(error = %e, "Migration aborted"),
        }
        result
    }

    async fn migrate(&self, source: &dyn RecordSource) -> Result<MigrationReport, OrchestratorError> {
        let records = source.load().await?;
        info!(records = records.len(), "Loaded source records");

        let PreparedInventory {
            categories,
            chains,
            hotels,
            reports: [mut category_report, mut chain_report, mut hotel_report],
        } = self.prepare(&records);

        self.loader
            .prepare_storage()
            .await
            .map_err(OrchestratorError::Schema)?;
        info!("Schema ensured");

        let outcome = self
            .loader
            .load_categories(&categories.accepted)
            .await
            .map_err(|source| OrchestratorError::Load {
                phase: Phase::Categories,
                source,
            })?;
        record_outcome(&mut category_report, outcome);
        info!(inserted = outcome.inserted, "Categories loaded");

        let outcome = self
            .loader
            .load_chains(&chains.accepted)
            .await
            .map_err(|source| OrchestratorError::Load {
                phase: Phase::Chains,
                source,
            })?;
        record_outcome(&mut chain_report, outcome);
        info!(inserted = outcome.inserted, "Chains loaded");

        let inserted = self
            .loader
            .load_hotels(&hotels.accepted)
            .await
            .map_err(|source| OrchestratorError::Load {
                phase: Phase::Hotels,
                source,
            })?;
        hotel_report.inserted = inserted;
        info!(inserted, "Hotels loaded");

        Ok(MigrationReport {
            categories: category_report,
            chains: chain_report,
            hotels: hotel_report,
        })
    }

    /// Extracts once and validates every collection before any write happens.
    fn prepare(&self, records: &[serde_json::Value]) -> PreparedInventory {
        let inventory = self.extractor.extract_all(records);
        if inventory.hotels.entities.is_empty() {
            warn!("No hotels found to migrate");
        }

        let (categories, category_report) =
            validate_phase(Phase::Categories, inventory.categories, validate_categories);
        let (chains, chain_report) =
            validate_phase(Phase::Chains, inventory.chains, validate_chains);
        let (hotels, hotel_report) = validate_phase(Phase::Hotels, inventory.hotels, |hotels| {
            validate_hotels(hotels, &categories.accepted, &chains.accepted)
        });

        PreparedInventory {
            categories,
            chains,
            hotels,
            reports: [category_report, chain_report, hotel_report],
        }
    }
}

fn validate_phase<T>(
    phase: Phase,
    extraction: Extraction<T>,
    validate: impl FnOnce(Vec<T>) -> Validated<T>,
) -> (Validated<T>, PhaseReport) {
    let Extraction { entities, diagnostics } = extraction;
    let mut report = PhaseReport::new(phase);
    report.extracted = entities.len();

    let validated = validate(entities);
    merge_diagnostics(&mut report, diagnostics, &validated.report);
    (validated, report)
}

fn merge_diagnostics(
    report: &mut PhaseReport,
    diagnostics: ExtractionDiagnostics,
    validation: &ValidationReport,
) {
    report.skipped = diagnostics.skipped + validation.rejected();
    report.duplicates = diagnostics.duplicates;
    report.messages = diagnostics.messages;
    report.messages.extend(validation.messages.iter().cloned());
}

fn record_outcome(report: &mut PhaseReport, outcome: InsertOutcome) {
    report.inserted = outcome.inserted;
    report.duplicates += outcome.already_present;
}
