//! Survey payload normalization.
//!
//! Guarantees the three containers the detector iterates over, whatever the
//! raw document looked like. Field-level coercion is left to the detector.

use serde_json::{Map, Value};

/// A survey document with guaranteed container shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSurvey {
    /// Building entries, in payload order. Entries are not inspected here.
    pub buildings: Vec<Value>,
    /// Road entries, in payload order.
    pub roads: Vec<Value>,
    /// Area category name to area.
    pub land_usage: Map<String, Value>,
    /// Declared zone of the surveyed area. A non-string value is dropped.
    pub zone_type: Option<String>,
    /// Remaining top-level fields (ward, drone and date metadata).
    pub extra: Map<String, Value>,
}

/// Normalize a raw survey payload.
///
/// Returns `None` when the payload is not a JSON object. Otherwise a missing
/// or wrongly-typed `buildings`/`roads` becomes an empty list and a missing
/// or wrongly-typed `land_usage` becomes an empty object.
pub fn normalize(payload: &Value) -> Option<NormalizedSurvey> {
    let Value::Object(fields) = payload else {
        return None;
    };
    let mut extra = fields.clone();

    let buildings = match extra.remove("buildings") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let roads = match extra.remove("roads") {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let land_usage = match extra.remove("land_usage") {
        Some(Value::Object(areas)) => areas,
        _ => Map::new(),
    };
    let zone_type = match extra.remove("zone_type") {
        Some(Value::String(zone)) => Some(zone),
        _ => None,
    };

    Some(NormalizedSurvey {
        buildings,
        roads,
        land_usage,
        zone_type,
        extra,
    })
}

impl NormalizedSurvey {
    /// Whether the survey recorded neither buildings nor roads.
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.roads.is_empty()
    }

    /// Rebuild the normalized document as JSON.
    pub fn to_value(&self) -> Value {
        let mut fields = self.extra.clone();
        fields.insert("buildings".into(), Value::Array(self.buildings.clone()));
        fields.insert("roads".into(), Value::Array(self.roads.clone()));
        fields.insert("land_usage".into(), Value::Object(self.land_usage.clone()));
        if let Some(zone) = &self.zone_type {
            fields.insert("zone_type".into(), Value::String(zone.clone()));
        }
        Value::Object(fields)
    }
}
