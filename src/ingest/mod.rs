//! Cohort ingest — newline-delimited JSON, one measurement record per line.
//!
//! The input boundary is deliberately forgiving: malformed lines are skipped
//! with a warning, aggregate fields are accepted flat or nested under a
//! `recist` block, and the lesion list may sit at the top level or inside an
//! `extras` container. Whatever survives normalization is handed to the
//! response engine as plain `MeasurementRecord`s.

pub mod ndjson;

pub use ndjson::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
