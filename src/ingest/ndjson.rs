use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use super::IngestError;
use crate::models::{LesionObservation, MeasurementRecord, RecistSummary};

/// Raw line shape. Accepts aggregate fields flat or nested under `recist`,
/// and the lesion list at the top level or one level under `extras`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    patient_id: String,
    #[serde(default)]
    timepoint: u32,
    study_date: String,
    #[serde(default)]
    recist: Option<RecistSummary>,
    #[serde(default)]
    baseline_sld_mm: Option<f64>,
    #[serde(default)]
    current_sld_mm: Option<f64>,
    #[serde(default)]
    nadir_sld_mm: Option<f64>,
    #[serde(default)]
    overall_response: Option<String>,
    #[serde(default)]
    lesions: Option<Vec<LesionObservation>>,
    #[serde(default)]
    extras: Option<Extras>,
}

#[derive(Debug, Default, Deserialize)]
struct Extras {
    #[serde(default)]
    lesions: Option<Vec<LesionObservation>>,
}

impl RawRecord {
    /// Flat fields win over the nested block, field by field.
    fn normalize(self) -> MeasurementRecord {
        let nested = self.recist.unwrap_or_default();
        let recist = RecistSummary {
            baseline_sld_mm: self.baseline_sld_mm.or(nested.baseline_sld_mm),
            current_sld_mm: self.current_sld_mm.or(nested.current_sld_mm),
            nadir_sld_mm: self.nadir_sld_mm.or(nested.nadir_sld_mm),
            overall_response: self.overall_response.or(nested.overall_response),
        };
        let lesions = self
            .lesions
            .or_else(|| self.extras.and_then(|e| e.lesions))
            .unwrap_or_default();

        MeasurementRecord {
            patient_id: self.patient_id,
            timepoint: self.timepoint,
            study_date: self.study_date,
            recist,
            lesions,
        }
    }
}

/// Parses one non-blank NDJSON line. `None` means the line was malformed
/// and has been logged + skipped.
fn parse_line(line: &str) -> Option<MeasurementRecord> {
    let raw: RawRecord = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!("Skipping malformed cohort line: {err}");
            return None;
        }
    };

    // A study date that is not a date fails the required-field contract.
    if NaiveDate::parse_from_str(&raw.study_date, "%Y-%m-%d").is_err() {
        tracing::warn!(
            "Skipping cohort line with non-ISO study_date {:?}",
            raw.study_date
        );
        return None;
    }

    Some(raw.normalize())
}

/// Reads a cohort from any reader, one JSON record per line.
/// Blank lines are ignored; malformed lines are skipped, never fatal.
pub fn parse_cohort<R: Read>(reader: R) -> Result<Vec<MeasurementRecord>, IngestError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_line(trimmed) {
            Some(rec) => records.push(rec),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Cohort ingest skipped {skipped} malformed line(s)");
    }
    Ok(records)
}

/// Loads a cohort file (e.g. `cohort_labels.jsonl`).
pub fn load_cohort(path: &Path) -> Result<Vec<MeasurementRecord>, IngestError> {
    let file = File::open(path)?;
    let records = parse_cohort(file)?;
    tracing::info!(
        "Loaded {} measurement record(s) from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(content: &str) -> Vec<MeasurementRecord> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cohort.jsonl");
        std::fs::write(&path, content).unwrap();
        load_cohort(&path).unwrap()
    }

    #[test]
    fn loads_flat_line() {
        let records = load_str(
            r#"{"patient_id":"PID000001","study_date":"2023-03-10","timepoint":1,"baseline_sld_mm":50,"current_sld_mm":30,"overall_response":"PR"}"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].recist.baseline_sld_mm, Some(50.0));
        assert_eq!(records[0].recist.current_sld_mm, Some(30.0));
        assert_eq!(records[0].recist.overall_response.as_deref(), Some("PR"));
    }

    #[test]
    fn loads_nested_recist_and_extras_lesions() {
        let records = load_str(
            r#"{"patient_id":"PID000002","study_date":"2023-01-05","recist":{"baseline_sld_mm":42,"overall_response":"Baseline (no category)"},"extras":{"lesions":[{"kind":"primary","site":"lung","location":"right upper lobe","baseline_mm":42,"current_mm":42,"target":true}]}}"#,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].recist.baseline_sld_mm, Some(42.0));
        assert_eq!(records[0].lesions.len(), 1);
        assert_eq!(records[0].lesions[0].site, "lung");
        assert!(records[0].lesions[0].target);
    }

    #[test]
    fn flat_fields_take_precedence_over_nested() {
        let records = load_str(
            r#"{"patient_id":"PID000003","study_date":"2023-02-01","current_sld_mm":25,"recist":{"baseline_sld_mm":40,"current_sld_mm":99}}"#,
        );
        assert_eq!(records.len(), 1);
        // Flat current wins; nested baseline fills the gap.
        assert_eq!(records[0].recist.current_sld_mm, Some(25.0));
        assert_eq!(records[0].recist.baseline_sld_mm, Some(40.0));
    }

    #[test]
    fn top_level_lesions_win_over_extras() {
        let records = load_str(
            r#"{"patient_id":"PID000004","study_date":"2023-02-01","lesions":[{"kind":"metastatic","site":"liver"}],"extras":{"lesions":[{"kind":"nodal","site":"mediastinum"},{"kind":"metastatic","site":"bone"}]}}"#,
        );
        assert_eq!(records[0].lesions.len(), 1);
        assert_eq!(records[0].lesions[0].site, "liver");
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let records = load_str(concat!(
            r#"{"patient_id":"PID000005","study_date":"2023-01-01"}"#,
            "\n",
            "{not json at all",
            "\n",
            "\n",
            r#"{"patient_id":"PID000005","study_date":"2023-03-01","timepoint":1}"#,
            "\n",
        ));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_patient_id_skips_line() {
        let records = load_str(r#"{"study_date":"2023-01-01","timepoint":0}"#);
        assert!(records.is_empty());
    }

    #[test]
    fn non_iso_study_date_skips_line() {
        let records = load_str(
            r#"{"patient_id":"PID000006","study_date":"01/15/2023"}"#,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_cohort(&dir.path().join("absent.jsonl"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
