use serde::{Deserialize, Serialize};

use super::lesion::LesionObservation;

/// One study for one patient at one timepoint, as ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub patient_id: String,
    /// 0 = baseline. Defaults to 0 when the input omits it.
    #[serde(default)]
    pub timepoint: u32,
    /// ISO `YYYY-MM-DD`. Kept as a string; ISO form makes lexicographic
    /// order equal chronological order.
    pub study_date: String,
    #[serde(default)]
    pub recist: RecistSummary,
    #[serde(default)]
    pub lesions: Vec<LesionObservation>,
}

/// Aggregate metric fields reported with each study.
///
/// `nadir_sld_mm` is advisory: the series builder recomputes the nadir from
/// scratch and never trusts this value. `overall_response` is an opaque
/// label carried through unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecistSummary {
    pub baseline_sld_mm: Option<f64>,
    pub current_sld_mm: Option<f64>,
    pub nadir_sld_mm: Option<f64>,
    pub overall_response: Option<String>,
}
