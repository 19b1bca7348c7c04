use std::collections::BTreeMap;

use crate::models::MeasurementRecord;

use super::types::{PatientSeries, Resolved, SeriesPoint};

/// Picks the first present candidate, degrading to `default` when all are
/// absent. `fallback` reports whether anything past the preferred source was
/// used, so degradation paths stay assertable in tests.
pub fn resolve_mm(candidates: &[Option<f64>], default: f64) -> Resolved {
    match candidates.iter().flatten().next() {
        Some(&value) => Resolved {
            value,
            fallback: candidates.first().map_or(true, |c| c.is_none()),
        },
        None => Resolved {
            value: default,
            fallback: true,
        },
    }
}

/// Aggregate SLD for one record: baseline value at timepoint 0; otherwise
/// current, then baseline, then 0. The all-absent zero is a deliberate
/// last-resort default that keeps the series numeric.
pub fn resolve_sld(record: &MeasurementRecord) -> Resolved {
    if record.timepoint == 0 {
        resolve_mm(&[record.recist.baseline_sld_mm], 0.0)
    } else {
        resolve_mm(
            &[record.recist.current_sld_mm, record.recist.baseline_sld_mm],
            0.0,
        )
    }
}

/// Percent change vs a reference that must be a positive number.
fn pct_change(value: f64, reference: Option<f64>) -> Option<f64> {
    match reference {
        Some(r) if r > 0.0 => Some((value - r) / r * 100.0),
        _ => None,
    }
}

/// Baseline slot: timepoint 0 when present, else the chronologically first.
fn baseline_record_index(records: &[MeasurementRecord]) -> usize {
    records.iter().position(|r| r.timepoint == 0).unwrap_or(0)
}

/// Same rule over already-built points, shared with the matrix builder.
pub(super) fn baseline_point_index(points: &[SeriesPoint]) -> usize {
    points
        .iter()
        .position(|p| p.record.timepoint == 0)
        .unwrap_or(0)
}

/// Builds one date-sorted, delta-enriched series per distinct patient,
/// sorted by patient identifier. Pure function of its input; duplicate
/// timepoints pass through as separate points.
pub fn build_patient_series(records: &[MeasurementRecord]) -> Vec<PatientSeries> {
    // Stable grouping, no dedup; BTreeMap keeps output sorted by patient id.
    let mut groups: BTreeMap<String, Vec<MeasurementRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.patient_id.clone())
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .map(|(patient_id, mut group)| {
            // Stable sort: equal dates keep input order.
            group.sort_by(|a, b| a.study_date.cmp(&b.study_date));

            let base_value = group[baseline_record_index(&group)].recist.baseline_sld_mm;
            let mut nadir = base_value;

            let points = group
                .into_iter()
                .map(|record| {
                    let sld = resolve_sld(&record);

                    // Update before the delta: a fresh low reads as 0% from nadir.
                    let nadir_mm = match nadir {
                        Some(n) => n.min(sld.value),
                        None => sld.value,
                    };
                    nadir = Some(nadir_mm);

                    SeriesPoint {
                        sld_mm: sld.value,
                        sld_fallback: sld.fallback,
                        nadir_mm,
                        pct_from_baseline: pct_change(sld.value, base_value),
                        pct_from_nadir: pct_change(sld.value, Some(nadir_mm)),
                        record,
                    }
                })
                .collect();

            PatientSeries { patient_id, points }
        })
        .collect()
}
