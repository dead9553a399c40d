use std::env;

use dotenv::dotenv;
use hotel_migrator::{Dependencies, MigrationError, Settings};
use hotel_migrator_shared::MigrationReport;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// `LOG_FORMAT=json` switches to structured JSON lines; otherwise output is
/// human-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("hotel_migrator=info,hotel_migrator_pipeline=info,hotel_migrator_repository=info")
    });

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    info!(
        service_name = "hotel-migrator",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

fn log_report(report: &MigrationReport) {
    for phase in report.phases() {
        info!(
            phase = %phase.phase,
            extracted = phase.extracted,
            inserted = phase.inserted,
            skipped = phase.skipped,
            duplicates = phase.duplicates,
            "Phase summary"
        );
        for message in &phase.messages {
            info!(phase = %phase.phase, "{message}");
        }
    }
}

/// Main entry point for the Hotel Migrator.
///
/// Loads `.env`, reads settings, and runs a single migration. Any failure is
/// returned from `main`, which makes the process exit non-zero.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), MigrationError> {
    dotenv().ok();
    init_tracing();

    let settings = Settings::from_env(env::args().skip(1))?;
    info!(source = %settings.source_path.display(), "Starting hotel migration");

    let Dependencies {
        orchestrator,
        source_path,
    } = Dependencies::new(&settings)?;

    match orchestrator.run_file(&source_path).await {
        Ok(report) => {
            log_report(&report);
            info!("Hotel migration completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, phase = ?e.phase(), "Hotel migration failed");
            Err(e.into())
        }
    }
}
