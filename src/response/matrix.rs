use std::collections::{BTreeMap, HashMap};

use super::series::baseline_point_index;
use super::types::{LesionMatrix, LesionRow, PatientSeries};

/// Reconciles per-lesion observations across one patient's timepoints into
/// identity-stable rows.
///
/// Rows are keyed by `LesionObservation::identity_key`; an identifier-less
/// observation whose composite key collides with another lesion silently
/// merges into that row. Labels follow first appearance ("L1", "L2", …),
/// not clinical significance.
pub fn build_lesion_matrix(series: &PatientSeries) -> LesionMatrix {
    let dates: Vec<String> = series
        .points
        .iter()
        .map(|p| p.record.study_date.clone())
        .collect();
    let base_idx = baseline_point_index(&series.points);

    // Insertion-ordered rows: label assignment is order-sensitive.
    let mut rows: Vec<LesionRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, point) in series.points.iter().enumerate() {
        let date = &point.record.study_date;

        for obs in &point.record.lesions {
            let key = obs.identity_key();
            let row_idx = match index.get(&key) {
                Some(&idx) => idx,
                None => {
                    // Site/rule/kind register from the first sighting.
                    let idx = rows.len();
                    rows.push(LesionRow {
                        key: key.clone(),
                        label: format!("L{}", idx + 1),
                        kind: obs.kind.clone(),
                        site: obs.site.clone(),
                        rule: obs.rule.clone(),
                        target: obs.target,
                        measurements: BTreeMap::new(),
                        contributions: BTreeMap::new(),
                    });
                    index.insert(key, idx);
                    idx
                }
            };

            let row = &mut rows[row_idx];
            row.target = row.target || obs.target;

            // Displayed value lands regardless of role; absent stays absent.
            if let Some(mm) = obs.current_mm {
                row.measurements.insert(date.clone(), mm);
            }

            // Contribution only where the target flag is set: baseline
            // measurement on the baseline timepoint, follow-up otherwise.
            if obs.target {
                let contribution = if i == base_idx {
                    obs.baseline_mm
                } else {
                    obs.follow_mm
                };
                if let Some(mm) = contribution {
                    row.contributions.insert(date.clone(), mm);
                }
            }
        }
    }

    // Target rows first, then site ascending; stable sort keeps first-seen
    // order within ties.
    rows.sort_by(|a, b| (!a.target, &a.site).cmp(&(!b.target, &b.site)));

    LesionMatrix {
        patient_id: series.patient_id.clone(),
        dates,
        rows,
    }
}
