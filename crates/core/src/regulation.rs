//! Zone regulation table.
//!
//! The table maps a zone name (`residential`, `commercial`, `industrial`,
//! `mixed`) to its building limits. It is read-only reference data: it is
//! loaded once at startup and shared by every detection run.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Zone used when a building declares no type or an unknown one.
pub const FALLBACK_ZONE: &str = "residential";

/// City-wide building regulations, keyed by zone name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationTable {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    pub zones: BTreeMap<String, ZoneRegulations>,
}

/// Everything regulated for a single zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRegulations {
    #[serde(default)]
    pub zone_code: Option<String>,
    pub building_regulations: BuildingRegulations,
    #[serde(default)]
    pub special_restrictions: Option<SpecialRestrictions>,
}

/// A limit as written in the table. Whole numbers stay whole (`18`) and
/// decimals stay decimal (`2.0`), so violations report the limit the way
/// the table states it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    Whole(i64),
    Decimal(f64),
}

impl Limit {
    pub fn as_f64(self) -> f64 {
        match self {
            Limit::Whole(n) => n as f64,
            Limit::Decimal(x) => x,
        }
    }
}

/// Numeric building limits for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRegulations {
    pub building_height_limit_meters: Limit,
    pub max_floors: i64,
    pub floor_area_ratio: Limit,
    pub setbacks: SetbackRegulations,
    #[serde(default)]
    pub land_use: Option<String>,
    #[serde(default)]
    pub road_width_minimum_meters: Option<Limit>,
    #[serde(default)]
    pub parking_requirement: Option<ParkingRequirement>,
}

/// Minimum distances between a building face and the plot boundary, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetbackRegulations {
    pub front_setback_meters: Limit,
    pub rear_setback_meters: Limit,
    pub side_setback_meters: Limit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingRequirement {
    pub car: String,
    pub two_wheeler: String,
}

/// Informational restrictions. Not consulted by the detector: the land-use
/// green-area check uses fixed per-zone minimums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRestrictions {
    #[serde(default)]
    pub basement_usage: Option<String>,
    #[serde(default)]
    pub rooftop_construction: Option<String>,
    #[serde(default)]
    pub green_area_minimum_percent: Option<Limit>,
}

impl RegulationTable {
    /// Check the table can serve every lookup the detector makes.
    ///
    /// Unknown building types fall back to the `residential` zone, so that
    /// zone must exist. A table without it is rejected here instead of
    /// failing halfway through a survey.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.zones.contains_key(FALLBACK_ZONE) {
            return Err(CoreError::Configuration(format!(
                "regulation table must define the '{FALLBACK_ZONE}' zone"
            )));
        }
        Ok(())
    }

    /// Parse and validate a table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let table: Self = serde_json::from_str(json).map_err(|e| {
            CoreError::Configuration(format!("invalid regulation table: {e}"))
        })?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Configuration(format!(
                "failed to read regulation table {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Regulations for `zone`, falling back to `residential` for unknown zones.
    ///
    /// Returns `None` only for a table that never passed [`validate`](Self::validate).
    pub fn zone_for(&self, zone: &str) -> Option<&ZoneRegulations> {
        self.zones
            .get(zone)
            .or_else(|| self.zones.get(FALLBACK_ZONE))
    }

    /// The built-in Indore 2025 building regulations.
    pub fn indore_2025() -> Self {
        use Limit::{Decimal, Whole};

        let zones = [
            (
                "residential",
                zone(
                    "RES",
                    "Residential",
                    (Whole(18), 5, Decimal(1.5)),
                    (Whole(3), Whole(2), Decimal(1.5)),
                    Whole(9),
                    ("1 per 75 sq.m builtup area", "1 per 40 sq.m builtup area"),
                    (
                        "Only for parking, not for commercial",
                        "Allowed only for utilities (water tank, solar panel)",
                        Whole(10),
                    ),
                ),
            ),
            (
                "commercial",
                zone(
                    "COM",
                    "Commercial",
                    (Whole(30), 8, Decimal(2.5)),
                    (Whole(5), Whole(3), Whole(2)),
                    Whole(12),
                    ("1 per 50 sq.m builtup area", "1 per 30 sq.m builtup area"),
                    (
                        "Allowed for parking + storage (not retail)",
                        "Allowed for utilities and solar panel only",
                        Whole(5),
                    ),
                ),
            ),
            (
                "industrial",
                zone(
                    "IND",
                    "Industrial",
                    (Whole(25), 6, Decimal(2.0)),
                    (Whole(8), Whole(5), Whole(4)),
                    Whole(15),
                    ("1 per 100 sq.m builtup area", "1 per 50 sq.m builtup area"),
                    (
                        "Allowed for storage and utilities",
                        "Allowed for utilities and solar panel",
                        Whole(8),
                    ),
                ),
            ),
            (
                "mixed",
                zone(
                    "MIX",
                    "Mixed Use",
                    (Whole(24), 7, Decimal(2.2)),
                    (Whole(4), Whole(3), Decimal(2.5)),
                    Whole(10),
                    ("1 per 60 sq.m builtup area", "1 per 35 sq.m builtup area"),
                    (
                        "Allowed for parking and storage",
                        "Allowed for utilities and solar panel",
                        Whole(7),
                    ),
                ),
            ),
        ];

        Self {
            city: Some("Indore".to_string()),
            year: Some(2025),
            zones: zones
                .into_iter()
                .map(|(name, regs)| (name.to_string(), regs))
                .collect(),
        }
    }
}

impl Default for RegulationTable {
    fn default() -> Self {
        Self::indore_2025()
    }
}

fn zone(
    code: &str,
    land_use: &str,
    (height, floors, far): (Limit, i64, Limit),
    (front, rear, side): (Limit, Limit, Limit),
    road_width: Limit,
    (car, two_wheeler): (&str, &str),
    (basement, rooftop, green): (&str, &str, Limit),
) -> ZoneRegulations {
    ZoneRegulations {
        zone_code: Some(code.to_string()),
        building_regulations: BuildingRegulations {
            building_height_limit_meters: height,
            max_floors: floors,
            floor_area_ratio: far,
            setbacks: SetbackRegulations {
                front_setback_meters: front,
                rear_setback_meters: rear,
                side_setback_meters: side,
            },
            land_use: Some(land_use.to_string()),
            road_width_minimum_meters: Some(road_width),
            parking_requirement: Some(ParkingRequirement {
                car: car.to_string(),
                two_wheeler: two_wheeler.to_string(),
            }),
        },
        special_restrictions: Some(SpecialRestrictions {
            basement_usage: Some(basement.to_string()),
            rooftop_construction: Some(rooftop.to_string()),
            green_area_minimum_percent: Some(green),
        }),
    }
}
