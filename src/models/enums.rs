use crate::ingest::IngestError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = IngestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(IngestError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(LesionKind {
    Primary => "primary",
    Nodal => "nodal",
    Metastatic => "metastatic",
});

str_enum!(MeasureRule {
    LongestDiameter => "longest_diameter",
    ShortAxis => "short_axis",
});

impl Default for MeasureRule {
    fn default() -> Self {
        Self::LongestDiameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn lesion_kind_round_trip() {
        for (variant, s) in [
            (LesionKind::Primary, "primary"),
            (LesionKind::Nodal, "nodal"),
            (LesionKind::Metastatic, "metastatic"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(LesionKind::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn measure_rule_round_trip() {
        for (variant, s) in [
            (MeasureRule::LongestDiameter, "longest_diameter"),
            (MeasureRule::ShortAxis, "short_axis"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(MeasureRule::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_snake_case_wire_strings() {
        let json = serde_json::to_string(&LesionKind::Metastatic).unwrap();
        assert_eq!(json, "\"metastatic\"");
        let back: MeasureRule = serde_json::from_str("\"short_axis\"").unwrap();
        assert_eq!(back, MeasureRule::ShortAxis);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(LesionKind::from_str("ln").is_err());
        assert!(MeasureRule::from_str("diameter").is_err());
        assert!(LesionKind::from_str("").is_err());
    }
}
