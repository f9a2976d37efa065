//! Violation detector.
//!
//! Compares a normalized survey against the regulation table. Rule groups
//! run in a fixed order (buildings, roads, land use, completeness) and the
//! output preserves it. Entities whose measurements cannot be read are
//! skipped with a warning; they never abort the run.

use serde_json::Value;

use super::entity::{entity_label, BuildingReading, LandUseReading, RoadReading};
use super::normalize::{normalize, NormalizedSurvey};
use super::numeric::{round2, Reading};
use super::rules::{
    self, min_green_percent, min_road_width, RESIDENTIAL_MAX_COMMERCIAL_PERCENT,
    SUSPICIOUS_ROAD_LENGTH_METERS,
};
use super::violation::{Measure, Violation};
use crate::regulation::RegulationTable;

/// Normalize `payload` and detect its violations.
///
/// A payload that is not a JSON object yields no violations; the anomaly is
/// logged and left to the caller to report.
pub fn detect_violations(payload: &Value, regulations: &RegulationTable) -> Vec<Violation> {
    match normalize(payload) {
        Some(survey) => detect(&survey, regulations),
        None => {
            tracing::warn!("Survey payload is not a JSON object, skipping violation detection");
            Vec::new()
        }
    }
}

/// Detect all violations in a normalized survey.
pub fn detect(survey: &NormalizedSurvey, regulations: &RegulationTable) -> Vec<Violation> {
    let mut violations = Vec::new();

    for entry in &survey.buildings {
        check_building(entry, regulations, &mut violations);
    }
    for entry in &survey.roads {
        check_road(entry, &mut violations);
    }
    check_land_use(survey, &mut violations);
    check_completeness(survey, &mut violations);

    tracing::debug!(count = violations.len(), "Violation detection finished");
    violations
}

fn check_building(entry: &Value, regulations: &RegulationTable, out: &mut Vec<Violation>) {
    let building = match BuildingReading::read(entry) {
        Ok(building) => building,
        Err(reason) => {
            tracing::warn!(
                building_id = %entity_label(entry, "building_id"),
                %reason,
                "Skipping building with unreadable data"
            );
            return;
        }
    };
    let Some(zone) = regulations.zone_for(&building.zone) else {
        tracing::error!(zone = %building.zone, "Regulation table has no fallback zone");
        return;
    };
    let limits = &zone.building_regulations;
    let context = building.zone.as_str();

    tracing::debug!(
        building_id = %building.building_id,
        height = building.height_meters,
        floors = building.floors,
        area = building.area_sq_meters,
        zone = context,
        "Checking building"
    );

    let mut found = Vec::new();

    found.extend(rules::HEIGHT.check(
        Measure::Number(building.height_meters),
        limits.building_height_limit_meters.into(),
        context,
    ));

    found.extend(rules::FLOORS.check(
        Measure::Count(building.floors),
        Measure::Count(limits.max_floors),
        context,
    ));

    if building.floors > 0 && building.area_sq_meters > 0.0 {
        // Plot area is derived from the footprint, so the ratio reduces to
        // the floor count. Kept as-is for compatibility with existing records.
        let plot_area = building.area_sq_meters / building.floors as f64;
        let far = if plot_area > 0.0 {
            building.area_sq_meters / plot_area
        } else {
            0.0
        };
        found.extend(rules::FLOOR_AREA_RATIO.check(
            Measure::Number(round2(far)),
            limits.floor_area_ratio.into(),
            context,
        ));
    }

    match building.front_setback {
        None => {}
        Some(Reading::Unparseable) => {
            tracing::warn!(
                building_id = %building.building_id,
                "Skipping setback check: front_setback_meters is not numeric"
            );
        }
        Some(reading) => {
            let front = reading.or_zero().unwrap_or_default();
            found.extend(rules::SETBACK.check(
                Measure::Number(front),
                limits.setbacks.front_setback_meters.into(),
                context,
            ));
        }
    }

    out.extend(found.into_iter().map(|mut v| {
        v.building_id = Some(building.building_id.clone());
        v
    }));
}

fn check_road(entry: &Value, out: &mut Vec<Violation>) {
    let road = match RoadReading::read(entry) {
        Ok(road) => road,
        Err(reason) => {
            tracing::warn!(
                road_id = %entity_label(entry, "road_id"),
                %reason,
                "Skipping road with unreadable data"
            );
            return;
        }
    };
    let min_width = min_road_width(&road.surface_type);

    tracing::debug!(
        road_id = %road.road_id,
        width = road.width_meters,
        length = road.length_meters,
        min_width,
        "Checking road"
    );

    let found = [
        rules::ROAD_WIDTH.check(
            Measure::Number(road.width_meters),
            Measure::Count(min_width),
            &road.surface_type,
        ),
        rules::ROAD_ENCROACHMENT.check(
            Measure::Number(road.length_meters),
            Measure::Count(SUSPICIOUS_ROAD_LENGTH_METERS),
            &road.surface_type,
        ),
    ];

    out.extend(found.into_iter().flatten().map(|mut v| {
        v.road_id = Some(road.road_id.clone());
        v
    }));
}

fn check_land_use(survey: &NormalizedSurvey, out: &mut Vec<Violation>) {
    let land = match LandUseReading::read(&survey.land_usage) {
        Ok(land) => land,
        Err(reason) => {
            tracing::warn!(%reason, "Skipping land usage checks");
            return;
        }
    };
    let total_area = land.total_area();
    if total_area <= 0.0 {
        return;
    }

    let zone_type = survey.zone_type.as_deref();
    let green_percent = land.green / total_area * 100.0;
    let min_green = min_green_percent(zone_type);

    tracing::debug!(
        total_area,
        green_percent,
        min_green,
        zone_type = zone_type.unwrap_or("unspecified"),
        "Checking land usage"
    );

    // Percentages are compared unrounded; only the reported value is rounded.
    out.extend(rules::GREEN_AREA.check_exact(
        green_percent,
        Measure::Number(round2(green_percent)),
        Measure::Count(min_green),
        zone_type.unwrap_or_default(),
    ));

    if zone_type == Some("residential") {
        let commercial_percent = land.commercial / total_area * 100.0;
        out.extend(rules::ZONE_MISUSE.check_exact(
            commercial_percent,
            Measure::Number(round2(commercial_percent)),
            Measure::Count(RESIDENTIAL_MAX_COMMERCIAL_PERCENT),
            "residential",
        ));
    }
}

fn check_completeness(survey: &NormalizedSurvey, out: &mut Vec<Violation>) {
    if survey.is_empty() {
        out.push(rules::DATA_INCOMPLETE.violation(
            Measure::Text("No buildings or roads data".into()),
            Measure::Text("Complete survey data required".into()),
            "",
        ));
    }
}
