//! Tumorline — longitudinal tumor response aggregation engine.
//!
//! Takes a flat stream of per-timepoint measurement records (optionally
//! carrying per-lesion detail) and derives per-patient size-over-time series
//! with baseline- and nadir-relative deltas, plus identity-stable
//! (lesion × date) matrices. Charting, tables and export are external
//! collaborators that consume the JSON payload this crate emits.

pub mod config;
pub mod ingest;
pub mod models;
pub mod response;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use ingest::IngestError;

/// Binary entry point: load the cohort file named on the command line and
/// write the complete engine payload to stdout as JSON. Logs go to stderr
/// so the payload stays parseable.
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let Some(path) = std::env::args().nth(1) else {
        tracing::error!("Usage: tumorline <cohort.jsonl>");
        std::process::exit(2);
    };

    if let Err(err) = emit_cohort(Path::new(&path)) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn emit_cohort(path: &Path) -> Result<(), IngestError> {
    let records = ingest::load_cohort(path)?;
    let data = response::build_cohort_data(&records);
    serde_json::to_writer(std::io::stdout().lock(), &data)?;
    Ok(())
}
