//! Survey-level figures derived from a detection run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::LandUseReading;
use super::normalize::normalize;
use super::numeric::round2;
use super::violation::{Severity, Violation};

/// Violation counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeveritySummary {
    pub fn tally(violations: &[Violation]) -> Self {
        violations
            .iter()
            .fold(Self::default(), |mut acc, v| {
                match v.severity {
                    Severity::High => acc.high += 1,
                    Severity::Medium => acc.medium += 1,
                    Severity::Low => acc.low += 1,
                }
                acc
            })
    }
}

/// Totals and compliance score for one surveyed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub total_buildings: usize,
    pub total_roads: usize,
    /// Residential + commercial + industrial area; 0 when unreadable.
    pub total_area_sq_meters: f64,
    pub total_violations: usize,
    pub severity_summary: SeveritySummary,
    pub compliance_score: f64,
}

impl SurveySummary {
    /// Summarize the detection document and its violations.
    pub fn compute(document: &Value, violations: &[Violation]) -> Self {
        let (total_buildings, total_roads, total_area_sq_meters) = match normalize(document) {
            Some(survey) => (
                survey.buildings.len(),
                survey.roads.len(),
                LandUseReading::read_total_area(&survey.land_usage).unwrap_or(0.0),
            ),
            None => (0, 0, 0.0),
        };

        Self {
            total_buildings,
            total_roads,
            total_area_sq_meters,
            total_violations: violations.len(),
            severity_summary: SeveritySummary::tally(violations),
            compliance_score: compliance_score(total_buildings + total_roads, violations.len()),
        }
    }
}

/// Share of surveyed entities without a violation, in percent.
///
/// Survey-wide violations count against the score too, so it can go below
/// zero. A survey with no entities scores 100.
pub fn compliance_score(entities: usize, violations: usize) -> f64 {
    if entities == 0 {
        return 100.0;
    }
    let entities = entities as f64;
    round2((entities - violations as f64) / entities * 100.0)
}
