//! Longitudinal response engine — size-over-time series and lesion matrices.
//!
//! `series` folds a flat stream of `MeasurementRecord`s into one date-sorted
//! `PatientSeries` per patient, with baseline- and nadir-relative percent
//! deltas. `matrix` reconciles each patient's per-lesion observations into
//! identity-stable rows over the study dates. `summary` condenses a series
//! into a cohort-list entry. Everything is a pure value recomputed from
//! scratch whenever the input set changes.

mod matrix;
mod series;
mod summary;
mod types;

pub use matrix::*;
pub use series::*;
pub use summary::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
