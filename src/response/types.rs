use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{LesionKind, MeasureRule, MeasurementRecord};

/// One timepoint enriched with derived aggregate numbers.
/// The original record rides along unchanged; the response label is never
/// reinterpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub record: MeasurementRecord,
    /// Aggregate size (SLD) plotted at this timepoint.
    pub sld_mm: f64,
    /// True when `sld_mm` did not come from the preferred field.
    pub sld_fallback: bool,
    /// Running nadir, recomputed from scratch. The reported nadir field is
    /// advisory only and never trusted.
    pub nadir_mm: f64,
    /// Percent change vs the series baseline value; `None` when the
    /// baseline is absent or not positive.
    pub pct_from_baseline: Option<f64>,
    /// Percent change vs the running nadir; `None` when the nadir is not
    /// positive.
    pub pct_from_nadir: Option<f64>,
}

/// All timepoints for one patient, sorted ascending by study date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSeries {
    pub patient_id: String,
    pub points: Vec<SeriesPoint>,
}

/// One lesion tracked across every timepoint it appears in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LesionRow {
    /// Stable identity: explicit lesion id, or the synthesized composite key.
    pub key: String,
    /// Display label in first-seen order: "L1", "L2", …
    pub label: String,
    pub kind: LesionKind,
    pub site: String,
    pub rule: MeasureRule,
    /// True if the lesion contributed to the SLD at any timepoint.
    pub target: bool,
    /// Displayed measurement per study date. An absent cell means no data,
    /// not zero.
    pub measurements: BTreeMap<String, f64>,
    /// SLD contribution per study date, present only where the target flag
    /// was set. Absence distinguishes "not contributing" from
    /// "contributes zero".
    pub contributions: BTreeMap<String, f64>,
}

/// Dense (lesion × date) view of one patient's series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LesionMatrix {
    pub patient_id: String,
    pub dates: Vec<String>,
    pub rows: Vec<LesionRow>,
}

/// Outcome of a prioritized-default resolution over nullable inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub value: f64,
    /// True when the preferred source was absent and a fallback (or the
    /// last-resort default) supplied the value.
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

/// Cohort-list entry for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    pub patient_id: String,
    pub n_timepoints: usize,
    pub baseline_date: Option<String>,
    pub latest_date: Option<String>,
    /// Last passthrough response label, if any.
    pub latest_response: Option<String>,
    /// Deepest (most negative) percent change from baseline over the series.
    pub best_pct_from_baseline: Option<f64>,
}

/// Complete engine output — a single payload for presentation collaborators.
/// `matrices` and `summaries` run parallel to `patients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortData {
    pub patients: Vec<PatientSeries>,
    pub matrices: Vec<LesionMatrix>,
    pub summaries: Vec<PatientSummary>,
    pub date_range: DateRange,
}
