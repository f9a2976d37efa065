//! Declarative rule table.
//!
//! Every violation kind is one [`RuleSpec`] row: its severity, which side of
//! the threshold is a breach, and the description template. The detector
//! only extracts measurements and thresholds; this table decides what they
//! mean.

use super::violation::{Measure, Severity, Violation, ViolationKind};

// ---------------------------------------------------------------------------
// Fixed thresholds
// ---------------------------------------------------------------------------

/// Surfaces that require the wider minimum road width.
pub const PAVED_SURFACES: &[&str] = &["asphalt", "concrete"];
/// Minimum road width for paved surfaces, in meters.
pub const PAVED_MIN_WIDTH_METERS: i64 = 9;
/// Minimum road width for any other surface, in meters.
pub const UNPAVED_MIN_WIDTH_METERS: i64 = 6;
/// Roads shorter than this are flagged as possible encroachments.
pub const SUSPICIOUS_ROAD_LENGTH_METERS: i64 = 5;

/// Minimum green share of built-up area, in percent.
pub const DEFAULT_MIN_GREEN_PERCENT: i64 = 10;
pub const COMMERCIAL_MIN_GREEN_PERCENT: i64 = 5;
pub const INDUSTRIAL_MIN_GREEN_PERCENT: i64 = 8;

/// Maximum commercial share of built-up area in a residential zone, in percent.
pub const RESIDENTIAL_MAX_COMMERCIAL_PERCENT: i64 = 20;

/// Minimum road width for a surface type.
pub fn min_road_width(surface_type: &str) -> i64 {
    if PAVED_SURFACES.contains(&surface_type) {
        PAVED_MIN_WIDTH_METERS
    } else {
        UNPAVED_MIN_WIDTH_METERS
    }
}

/// Minimum green-area percentage for the declared zone of a survey.
pub fn min_green_percent(zone_type: Option<&str>) -> i64 {
    match zone_type {
        Some("commercial") => COMMERCIAL_MIN_GREEN_PERCENT,
        Some("industrial") => INDUSTRIAL_MIN_GREEN_PERCENT,
        _ => DEFAULT_MIN_GREEN_PERCENT,
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Which side of the threshold is a breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `current > allowed`
    Exceeds,
    /// `current < allowed`
    FallsShort,
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSpec {
    pub kind: ViolationKind,
    pub severity: Severity,
    /// `None` for presence rules that do not compare numbers.
    pub comparison: Option<Comparison>,
    /// Description with `{current}`, `{allowed}` and `{context}` placeholders.
    pub template: &'static str,
}

pub const HEIGHT: RuleSpec = RuleSpec {
    kind: ViolationKind::Height,
    severity: Severity::High,
    comparison: Some(Comparison::Exceeds),
    template: "Building height {current}m exceeds limit of {allowed}m for {context} zone",
};

pub const FLOORS: RuleSpec = RuleSpec {
    kind: ViolationKind::Floor,
    severity: Severity::High,
    comparison: Some(Comparison::Exceeds),
    template: "Building has {current} floors, exceeding limit of {allowed} for {context} zone",
};

pub const FLOOR_AREA_RATIO: RuleSpec = RuleSpec {
    kind: ViolationKind::FloorAreaRatio,
    severity: Severity::Medium,
    comparison: Some(Comparison::Exceeds),
    template: "FAR {current} exceeds limit of {allowed} for {context} zone",
};

pub const SETBACK: RuleSpec = RuleSpec {
    kind: ViolationKind::Setback,
    severity: Severity::Medium,
    comparison: Some(Comparison::FallsShort),
    template: "Front setback {current}m is less than required {allowed}m for {context} zone",
};

pub const ROAD_WIDTH: RuleSpec = RuleSpec {
    kind: ViolationKind::RoadWidth,
    severity: Severity::Medium,
    comparison: Some(Comparison::FallsShort),
    template: "Road width {current}m is less than minimum {allowed}m for {context} surface",
};

pub const ROAD_ENCROACHMENT: RuleSpec = RuleSpec {
    kind: ViolationKind::RoadEncroachment,
    severity: Severity::Low,
    comparison: Some(Comparison::FallsShort),
    template: "Road length {current}m is suspiciously short, possible encroachment",
};

pub const GREEN_AREA: RuleSpec = RuleSpec {
    kind: ViolationKind::GreenArea,
    severity: Severity::Low,
    comparison: Some(Comparison::FallsShort),
    template: "Green area {current}% is less than minimum {allowed}% requirement",
};

pub const ZONE_MISUSE: RuleSpec = RuleSpec {
    kind: ViolationKind::ZoneMisuse,
    severity: Severity::High,
    comparison: Some(Comparison::Exceeds),
    template: "Commercial area {current}% exceeds {allowed}% limit in residential zone",
};

pub const DATA_INCOMPLETE: RuleSpec = RuleSpec {
    kind: ViolationKind::DataIncomplete,
    severity: Severity::Medium,
    comparison: None,
    template: "Survey data is incomplete - missing buildings and roads information",
};

/// All rules, in detection order.
pub const RULES: &[RuleSpec] = &[
    HEIGHT,
    FLOORS,
    FLOOR_AREA_RATIO,
    SETBACK,
    ROAD_WIDTH,
    ROAD_ENCROACHMENT,
    GREEN_AREA,
    ZONE_MISUSE,
    DATA_INCOMPLETE,
];

impl ViolationKind {
    /// The rule table row for this kind.
    pub fn spec(self) -> &'static RuleSpec {
        match self {
            ViolationKind::Height => &HEIGHT,
            ViolationKind::Floor => &FLOORS,
            ViolationKind::FloorAreaRatio => &FLOOR_AREA_RATIO,
            ViolationKind::Setback => &SETBACK,
            ViolationKind::RoadWidth => &ROAD_WIDTH,
            ViolationKind::RoadEncroachment => &ROAD_ENCROACHMENT,
            ViolationKind::GreenArea => &GREEN_AREA,
            ViolationKind::ZoneMisuse => &ZONE_MISUSE,
            ViolationKind::DataIncomplete => &DATA_INCOMPLETE,
        }
    }

    pub fn severity(self) -> Severity {
        self.spec().severity
    }
}

impl RuleSpec {
    /// Whether `current` breaches `allowed` under this rule.
    pub fn is_breached(&self, current: f64, allowed: f64) -> bool {
        match self.comparison {
            Some(Comparison::Exceeds) => current > allowed,
            Some(Comparison::FallsShort) => current < allowed,
            None => false,
        }
    }

    /// Render the description template.
    pub fn describe(&self, current: &Measure, allowed: &Measure, context: &str) -> String {
        self.template
            .replace("{current}", &current.to_string())
            .replace("{allowed}", &allowed.to_string())
            .replace("{context}", context)
    }

    /// Compare and build the violation in one step. `None` when compliant
    /// or when either side is not numeric.
    pub fn check(&self, current: Measure, allowed: Measure, context: &str) -> Option<Violation> {
        let exact = current.as_f64()?;
        self.check_exact(exact, current, allowed, context)
    }

    /// Compare `exact` against the limit but report `current`, which may be
    /// a rounded form of it.
    pub fn check_exact(
        &self,
        exact: f64,
        current: Measure,
        allowed: Measure,
        context: &str,
    ) -> Option<Violation> {
        let breached = self.is_breached(exact, allowed.as_f64()?);
        breached.then(|| self.violation(current, allowed, context))
    }

    /// Build a violation of this kind unconditionally.
    pub fn violation(&self, current: Measure, allowed: Measure, context: &str) -> Violation {
        Violation {
            kind: self.kind,
            building_id: None,
            road_id: None,
            description: self.describe(&current, &allowed, context),
            current,
            allowed,
            severity: self.severity,
        }
    }
}
