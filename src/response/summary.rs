use crate::models::MeasurementRecord;

use super::matrix::build_lesion_matrix;
use super::series::{baseline_point_index, build_patient_series};
use super::types::{CohortData, DateRange, PatientSeries, PatientSummary};

/// Cohort-list entry for one patient's series.
pub fn summarize_patient(series: &PatientSeries) -> PatientSummary {
    let baseline_date = series
        .points
        .get(baseline_point_index(&series.points))
        .map(|p| p.record.study_date.clone());

    let best_pct_from_baseline = series
        .points
        .iter()
        .filter_map(|p| p.pct_from_baseline)
        .fold(None, |best: Option<f64>, pct| match best {
            Some(b) if b <= pct => Some(b),
            _ => Some(pct),
        });

    PatientSummary {
        patient_id: series.patient_id.clone(),
        n_timepoints: series.points.len(),
        baseline_date,
        latest_date: series.points.last().map(|p| p.record.study_date.clone()),
        latest_response: series
            .points
            .last()
            .and_then(|p| p.record.recist.overall_response.clone()),
        best_pct_from_baseline,
    }
}

/// Earliest/latest study date across the cohort. Each series is already
/// date-sorted, so only its endpoints matter.
pub fn cohort_date_range(patients: &[PatientSeries]) -> DateRange {
    let mut earliest: Option<String> = None;
    let mut latest: Option<String> = None;

    for series in patients {
        if let Some(first) = series.points.first() {
            let date = first.record.study_date.as_str();
            if earliest.as_deref().map_or(true, |e| date < e) {
                earliest = Some(date.to_string());
            }
        }
        if let Some(last) = series.points.last() {
            let date = last.record.study_date.as_str();
            if latest.as_deref().map_or(true, |l| date > l) {
                latest = Some(date.to_string());
            }
        }
    }

    DateRange { earliest, latest }
}

/// Top-level assembly: everything the presentation layer needs in one call.
pub fn build_cohort_data(records: &[MeasurementRecord]) -> CohortData {
    let patients = build_patient_series(records);
    let matrices = patients.iter().map(build_lesion_matrix).collect();
    let summaries = patients.iter().map(summarize_patient).collect();
    let date_range = cohort_date_range(&patients);

    CohortData {
        patients,
        matrices,
        summaries,
        date_range,
    }
}
