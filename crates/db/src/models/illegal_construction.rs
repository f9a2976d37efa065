//! Models for illegal-construction records and their status timeline.

use garun_core::survey::{Measure, Severity, Violation, ViolationKind};
use garun_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::log::Record;
use crate::models::survey::SurveyRecord;

pub const STATUS_DETECTED: &str = "detected";
pub const STATUS_RESOLVED: &str = "resolved";

// ── Illegal constructions ────────────────────────────────────────────

/// One violation found by a survey, tracked until resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IllegalConstructionRecord {
    pub id: RecordId,
    pub survey_id: RecordId,
    pub building_id: Option<Value>,
    pub road_id: Option<Value>,
    pub violation_type: ViolationKind,
    pub current_value: Measure,
    pub allowed_value: Measure,
    pub severity: Severity,
    pub description: String,
    pub ward_no: Value,
    pub ward_name: String,
    pub coordinates: Value,
    pub detected_at: Timestamp,
    pub status: String,
    pub action_required: bool,
    /// Same tier as `severity`.
    pub priority: Severity,
    pub estimated_resolution_days: u32,
    #[serde(default)]
    pub updates: Vec<StatusUpdateEntry>,
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
}

impl Record for IllegalConstructionRecord {
    const ENTITY: &'static str = "Illegal construction";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Survey-level context copied onto each record of a batch.
#[derive(Debug, Clone)]
pub struct ViolationContext {
    pub survey_id: RecordId,
    pub ward_no: Value,
    pub ward_name: String,
    pub coordinates: Value,
}

impl ViolationContext {
    /// Location details copied from a stored survey.
    pub fn for_survey(survey: &SurveyRecord) -> Self {
        Self {
            survey_id: survey.id.clone(),
            ward_no: survey.ward_no.clone(),
            ward_name: survey.ward_name.clone(),
            coordinates: survey.coordinates.clone(),
        }
    }
}

impl IllegalConstructionRecord {
    /// A freshly detected record for `violation`.
    pub fn detected(
        id: RecordId,
        violation: &Violation,
        context: &ViolationContext,
        detected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            survey_id: context.survey_id.clone(),
            building_id: violation.building_id.clone(),
            road_id: violation.road_id.clone(),
            violation_type: violation.kind,
            current_value: violation.current.clone(),
            allowed_value: violation.allowed.clone(),
            severity: violation.severity,
            description: violation.description.clone(),
            ward_no: context.ward_no.clone(),
            ward_name: context.ward_name.clone(),
            coordinates: context.coordinates.clone(),
            detected_at,
            status: STATUS_DETECTED.to_string(),
            action_required: true,
            priority: violation.severity,
            estimated_resolution_days: violation.severity.resolution_days(),
            updates: Vec::new(),
            last_updated: None,
            updated_by: None,
            action_taken: None,
            resolved_at: None,
        }
    }
}

// ── Status timeline ──────────────────────────────────────────────────

/// One entry of a record's status timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateEntry {
    pub date: Timestamp,
    pub status: String,
    pub message: String,
    pub officer: String,
    pub action: String,
}

/// DTO for a status change by an officer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateViolationStatus {
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[validate(length(min = 1, message = "officer must not be empty"))]
    pub officer: String,
    #[serde(default)]
    pub action_taken: String,
}
