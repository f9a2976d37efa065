//! Typed readings of individual survey entities.
//!
//! Each reader pulls the fields one rule group needs out of a raw JSON entry
//! and either yields fully-interpreted numbers or a [`SkipReason`]. A
//! building or road with any unreadable measurement is excluded as a whole.

use std::fmt;

use serde_json::{Map, Value};

use super::numeric::{is_blank, read_count, read_float, Reading};

/// Zone assumed for buildings without a `type`.
pub const DEFAULT_BUILDING_TYPE: &str = "residential";

/// Surface assumed for roads without a `surface_type`.
pub const DEFAULT_SURFACE_TYPE: &str = "asphalt";

/// Why an entity (or a single check) was left out of evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is not a JSON object.
    NotAnObject,
    /// The named field holds a value that is not a number.
    Unparseable(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => f.write_str("entry is not an object"),
            SkipReason::Unparseable(field) => write!(f, "{field} is not numeric"),
        }
    }
}

/// Label an entity for log output: its identifier, or `unknown`.
pub fn entity_label(entry: &Value, id_key: &str) -> String {
    match entry.get(id_key) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

fn require<T: Default>(reading: Reading<T>, field: &'static str) -> Result<T, SkipReason> {
    reading.or_zero().ok_or(SkipReason::Unparseable(field))
}

/// A building with all measurements interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingReading {
    /// Identifier as supplied (string, number or `null`).
    pub building_id: Value,
    /// Declared zone type, used to pick regulations and in descriptions.
    pub zone: String,
    pub height_meters: f64,
    pub floors: i64,
    pub area_sq_meters: f64,
    /// `None` when no setbacks were recorded. Otherwise the front setback
    /// reading, which may itself be unparseable.
    pub front_setback: Option<Reading<f64>>,
}

impl BuildingReading {
    pub fn read(entry: &Value) -> Result<Self, SkipReason> {
        let Value::Object(fields) = entry else {
            return Err(SkipReason::NotAnObject);
        };

        let zone = match fields.get("type") {
            Some(Value::String(zone)) => zone.clone(),
            _ => DEFAULT_BUILDING_TYPE.to_string(),
        };

        let height_meters = require(read_float(fields.get("height_meters")), "height_meters")?;
        let floors = require(read_count(fields.get("floors")), "floors")?;
        let area_sq_meters = require(read_float(fields.get("area_sq_meters")), "area_sq_meters")?;

        let front_setback = match fields.get("setbacks") {
            None => None,
            Some(setbacks) if is_blank(setbacks) => None,
            Some(Value::Object(setbacks)) => Some(read_float(setbacks.get("front_setback_meters"))),
            Some(_) => Some(Reading::Unparseable),
        };

        Ok(Self {
            building_id: fields.get("building_id").cloned().unwrap_or(Value::Null),
            zone,
            height_meters,
            floors,
            area_sq_meters,
            front_setback,
        })
    }
}

/// A road with width and length interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadReading {
    pub road_id: Value,
    /// Surface type as text. Non-string values are rendered as JSON.
    pub surface_type: String,
    pub width_meters: f64,
    pub length_meters: f64,
}

impl RoadReading {
    pub fn read(entry: &Value) -> Result<Self, SkipReason> {
        let Value::Object(fields) = entry else {
            return Err(SkipReason::NotAnObject);
        };

        let surface_type = match fields.get("surface_type") {
            None => DEFAULT_SURFACE_TYPE.to_string(),
            Some(Value::String(surface)) => surface.clone(),
            Some(other) => other.to_string(),
        };

        let width_meters = require(read_float(fields.get("width_meters")), "width_meters")?;
        let length_meters = require(read_float(fields.get("length_meters")), "length_meters")?;

        Ok(Self {
            road_id: fields.get("road_id").cloned().unwrap_or(Value::Null),
            surface_type,
            width_meters,
            length_meters,
        })
    }
}

/// Land-use areas in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandUseReading {
    pub residential: f64,
    pub commercial: f64,
    pub industrial: f64,
    pub green: f64,
}

fn read_area(land_usage: &Map<String, Value>, field: &'static str) -> Result<f64, SkipReason> {
    require(read_float(land_usage.get(field)), field)
}

impl LandUseReading {
    pub fn read(land_usage: &Map<String, Value>) -> Result<Self, SkipReason> {
        Ok(Self {
            residential: read_area(land_usage, "residential_area_sq_meters")?,
            commercial: read_area(land_usage, "commercial_area_sq_meters")?,
            industrial: read_area(land_usage, "industrial_area_sq_meters")?,
            green: read_area(land_usage, "green_area_sq_meters")?,
        })
    }

    /// Built-up area straight from the land-usage fields. The green area is
    /// not read, so a bad green value does not affect the total.
    pub fn read_total_area(land_usage: &Map<String, Value>) -> Result<f64, SkipReason> {
        Ok(read_area(land_usage, "residential_area_sq_meters")?
            + read_area(land_usage, "commercial_area_sq_meters")?
            + read_area(land_usage, "industrial_area_sq_meters")?)
    }

    /// Built-up area. Green area is not part of the total.
    pub fn total_area(&self) -> f64 {
        self.residential + self.commercial + self.industrial
    }
}
