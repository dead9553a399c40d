use std::path::PathBuf;
use std::sync::Arc;

use hotel_migrator_pipeline::loader::BatchLoader;
use hotel_migrator_pipeline::orchestrator::Orchestrator;
use hotel_migrator_repository::PostgresInventoryRepository;
use tracing::info;

use crate::config::Settings;
use crate::errors::MigrationError;

/// `Dependencies` holds the wired components of one migration run.
///
/// It includes the orchestrator, backed by a PostgreSQL inventory repository,
/// and the path of the source document to migrate.
pub struct Dependencies {
    pub orchestrator: Orchestrator,
    pub source_path: PathBuf,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// The storage connection is opened lazily on first use, so building the
    /// dependencies never touches the database.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on success or a `MigrationError` if the
    /// connection settings cannot be turned into connect options.
    pub fn new(settings: &Settings) -> Result<Self, MigrationError> {
        let options = settings.connection.connect_options()?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            "Using PostgreSQL inventory store"
        );

        let repository = PostgresInventoryRepository::connect_lazy(options);
        let loader = BatchLoader::new(Arc::new(repository));

        Ok(Dependencies {
            orchestrator: Orchestrator::new(loader),
            source_path: settings.source_path.clone(),
        })
    }
}
