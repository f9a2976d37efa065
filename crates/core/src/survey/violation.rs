//! Violation records produced by the detector.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::regulation::Limit;

/// The fixed violation taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    #[serde(rename = "height_violation")]
    Height,
    #[serde(rename = "floor_violation")]
    Floor,
    #[serde(rename = "far_violation")]
    FloorAreaRatio,
    #[serde(rename = "setback_violation")]
    Setback,
    #[serde(rename = "road_width_violation")]
    RoadWidth,
    #[serde(rename = "road_encroachment_suspicion")]
    RoadEncroachment,
    #[serde(rename = "green_area_violation")]
    GreenArea,
    #[serde(rename = "zone_misuse_violation")]
    ZoneMisuse,
    #[serde(rename = "data_incomplete_violation")]
    DataIncomplete,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 9] = [
        ViolationKind::Height,
        ViolationKind::Floor,
        ViolationKind::FloorAreaRatio,
        ViolationKind::Setback,
        ViolationKind::RoadWidth,
        ViolationKind::RoadEncroachment,
        ViolationKind::GreenArea,
        ViolationKind::ZoneMisuse,
        ViolationKind::DataIncomplete,
    ];

    /// Wire name, e.g. `height_violation`.
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Height => "height_violation",
            ViolationKind::Floor => "floor_violation",
            ViolationKind::FloorAreaRatio => "far_violation",
            ViolationKind::Setback => "setback_violation",
            ViolationKind::RoadWidth => "road_width_violation",
            ViolationKind::RoadEncroachment => "road_encroachment_suspicion",
            ViolationKind::GreenArea => "green_area_violation",
            ViolationKind::ZoneMisuse => "zone_misuse_violation",
            ViolationKind::DataIncomplete => "data_incomplete_violation",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed priority tier of a violation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Days allotted to resolve a violation of this severity.
    pub fn resolution_days(self) -> u32 {
        match self {
            Severity::High => 30,
            Severity::Medium => 60,
            Severity::Low => 90,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measured or allowed value attached to a violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Count(i64),
    Number(f64),
    Text(String),
}

impl From<Limit> for Measure {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Whole(n) => Measure::Count(n),
            Limit::Decimal(x) => Measure::Number(x),
        }
    }
}

impl Measure {
    /// Numeric view, for comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Measure::Count(n) => Some(*n as f64),
            Measure::Number(x) => Some(*x),
            Measure::Text(_) => None,
        }
    }
}

impl fmt::Display for Measure {
    /// Decimals always keep a fractional digit (`20.0`), counts do not.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Count(n) => write!(f, "{n}"),
            Measure::Number(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Measure::Number(x) => write!(f, "{x}"),
            Measure::Text(s) => f.write_str(s),
        }
    }
}

/// One detected rule breach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// Set for building-scoped violations (may hold `null` when the building
    /// had no identifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<Value>,
    /// Set for road-scoped violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_id: Option<Value>,
    pub current: Measure,
    pub allowed: Measure,
    pub severity: Severity,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_serialize_to_wire_names() {
        for kind in ViolationKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
        assert_eq!(serde_json::to_value(Severity::Medium).unwrap(), json!("medium"));
    }

    #[test]
    fn limits_keep_their_number_type() {
        assert_eq!(Measure::from(Limit::Whole(18)), Measure::Count(18));
        assert_eq!(Measure::from(Limit::Decimal(2.0)), Measure::Number(2.0));
        assert_eq!(Measure::from(Limit::Whole(18)).to_string(), "18");
        assert_eq!(Measure::from(Limit::Decimal(2.0)).to_string(), "2.0");
        assert_eq!(serde_json::to_string(&Measure::from(Limit::Decimal(2.0))).unwrap(), "2.0");
        assert_eq!(Measure::Number(20.0).to_string(), "20.0");
        assert_eq!(Measure::Number(12.35).to_string(), "12.35");
    }

    #[test]
    fn violation_shape() {
        let v = Violation {
            kind: ViolationKind::RoadWidth,
            building_id: None,
            road_id: Some(json!("R1")),
            current: Measure::Number(7.5),
            allowed: Measure::Count(9),
            severity: Severity::Medium,
            description: "narrow".into(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "road_width_violation");
        assert_eq!(json["road_id"], "R1");
        assert!(json.get("building_id").is_none());
        assert_eq!(json["current"], 7.5);
        assert_eq!(json["allowed"], 9);
        assert_eq!(json["severity"], "medium");
    }

    #[test]
    fn resolution_days_by_severity() {
        assert_eq!(Severity::High.resolution_days(), 30);
        assert_eq!(Severity::Medium.resolution_days(), 60);
        assert_eq!(Severity::Low.resolution_days(), 90);
    }
}
