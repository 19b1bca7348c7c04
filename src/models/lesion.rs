use serde::{Deserialize, Serialize};

use super::enums::{LesionKind, MeasureRule};

/// Separator for the synthesized identity key. Fixed so that keys are
/// stable across timepoints and across runs.
const KEY_SEPARATOR: &str = "|";

/// One lesion as observed at one timepoint.
///
/// `baseline_mm` is meaningful only when the observation belongs to the
/// baseline timepoint, `follow_mm` only on follow-ups. `current_mm` is the
/// displayed value for the timepoint regardless of role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LesionObservation {
    #[serde(default)]
    pub lesion_id: Option<String>,
    pub kind: LesionKind,
    pub site: String,
    /// Nodal station (e.g. "subcarinal", "porta hepatis").
    #[serde(default)]
    pub station: Option<String>,
    /// Sub-site of a primary (e.g. "right upper lobe").
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub rule: MeasureRule,
    #[serde(default)]
    pub baseline_mm: Option<f64>,
    #[serde(default)]
    pub follow_mm: Option<f64>,
    #[serde(default)]
    pub current_mm: Option<f64>,
    /// Whether this lesion contributes to the SLD at this timepoint.
    #[serde(default)]
    pub target: bool,
}

impl LesionObservation {
    /// Stable identity used to track one physical lesion across timepoints.
    ///
    /// Uses `lesion_id` when present. Otherwise synthesizes a deterministic
    /// key from kind, site and station-or-location. Two identifier-less
    /// lesions sharing that combination merge into a single row; callers
    /// that cannot guarantee uniqueness must supply `lesion_id`.
    pub fn identity_key(&self) -> String {
        if let Some(ref id) = self.lesion_id {
            return id.clone();
        }
        let sub = self
            .station
            .as_deref()
            .or(self.location.as_deref())
            .unwrap_or("");
        [self.kind.as_str(), self.site.as_str(), sub].join(KEY_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> LesionObservation {
        LesionObservation {
            lesion_id: None,
            kind: LesionKind::Nodal,
            site: "mediastinum".into(),
            station: Some("subcarinal".into()),
            location: None,
            rule: MeasureRule::ShortAxis,
            baseline_mm: Some(14.0),
            follow_mm: None,
            current_mm: Some(14.0),
            target: true,
        }
    }

    #[test]
    fn explicit_id_wins_over_composite() {
        let mut obs = observation();
        obs.lesion_id = Some("L-SUB-1".into());
        assert_eq!(obs.identity_key(), "L-SUB-1");
    }

    #[test]
    fn composite_key_uses_station() {
        let obs = observation();
        assert_eq!(obs.identity_key(), "nodal|mediastinum|subcarinal");
    }

    #[test]
    fn composite_key_falls_back_to_location() {
        let mut obs = observation();
        obs.kind = LesionKind::Primary;
        obs.site = "lung".into();
        obs.station = None;
        obs.location = Some("right upper lobe".into());
        assert_eq!(obs.identity_key(), "primary|lung|right upper lobe");
    }

    #[test]
    fn composite_key_without_sub_site() {
        let mut obs = observation();
        obs.kind = LesionKind::Metastatic;
        obs.site = "liver".into();
        obs.station = None;
        assert_eq!(obs.identity_key(), "metastatic|liver|");
    }

    #[test]
    fn deserializes_with_sparse_fields() {
        let obs: LesionObservation =
            serde_json::from_str(r#"{"kind":"metastatic","site":"adrenal"}"#).unwrap();
        assert!(obs.lesion_id.is_none());
        assert_eq!(obs.rule, MeasureRule::LongestDiameter);
        assert!(!obs.target);
        assert!(obs.current_mm.is_none());
    }
}
