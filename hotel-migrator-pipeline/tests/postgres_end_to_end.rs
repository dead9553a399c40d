//! End-to-end migration runs against a real PostgreSQL database.
//!
//! Every run gets its own lazily connected repository, the way the binary
//! builds one per process.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test --test postgres_end_to_end -- --ignored`

use std::sync::Arc;

use hotel_migrator_pipeline::errors::OrchestratorError;
use hotel_migrator_pipeline::loader::BatchLoader;
use hotel_migrator_pipeline::orchestrator::Orchestrator;
use hotel_migrator_repository::{InventoryRepository, PostgresInventoryRepository};
use hotel_migrator_shared::Phase;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

const SOURCE: &str = r#"{
    "a": {"property_id": 1, "name": "hotel 1",
          "category": {"id": "1", "name": "Hotel"}, "chain": {"id": "0", "name": "Test_Chain"},
          "location": {"obfuscation_required": false, "coordinates": {"latitude": 1.0, "longitude": 2.0}}},
    "b": {"property_id": 2, "name": "hotel 2",
          "category": {"id": "1", "name": "Renamed"}, "chain": {"id": "x", "name": "Bad"},
          "location": {"obfuscation_required": true, "obfuscated_coordinates": {"latitude": 3.5, "longitude": 4.5}}}
}"#;

fn orchestrator(options: &PgConnectOptions) -> Orchestrator {
    let repository = PostgresInventoryRepository::connect_lazy(options.clone());
    Orchestrator::new(BatchLoader::new(Arc::new(repository)))
}

async fn count_rows(pool: &sqlx::PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_rerun_keeps_dimension_rows_and_fails_hotels(
    pool_options: PgPoolOptions,
    options: PgConnectOptions,
) {
    let report = orchestrator(&options).run_json(SOURCE).await.unwrap();
    assert_eq!(report.categories.inserted, 1);
    assert_eq!(report.categories.duplicates, 1);
    assert_eq!(report.chains.inserted, 1);
    assert_eq!(report.chains.skipped, 1);
    assert_eq!(report.hotels.inserted, 1);

    let error = orchestrator(&options).run_json(SOURCE).await.unwrap_err();
    assert!(matches!(
        error,
        OrchestratorError::Load {
            phase: Phase::Hotels,
            ..
        }
    ));

    let pool = pool_options.connect_with(options.clone()).await.unwrap();
    assert_eq!(count_rows(&pool, "category").await, 1);
    assert_eq!(count_rows(&pool, "hotel_chain").await, 1);
    assert_eq!(count_rows(&pool, "hotel").await, 1);

    let names = PostgresInventoryRepository::new(pool)
        .dimension_names(Some("1"), Some("0"))
        .await
        .unwrap();
    assert_eq!(names, (Some("Hotel".to_string()), Some("Test_Chain".to_string())));
}
