//! Models for completed surveys.

use garun_core::regulation::RegulationTable;
use garun_core::survey::summary::SurveySummary;
use garun_core::survey::Violation;
use garun_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::log::Record;

/// Status of a survey once detection has run.
pub const SURVEY_STATUS_COMPLETED: &str = "completed";

/// Incharge recorded when the form does not name one.
pub const UNKNOWN_INCHARGE: &str = "Unknown";

// ── Surveys ──────────────────────────────────────────────────────────

/// A stored survey with its detection results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: RecordId,
    /// The form document as submitted.
    pub survey_data: Value,
    /// The document detection actually ran on.
    pub drone_data_used: Value,
    pub violations: Vec<Violation>,
    pub regulations_used: RegulationTable,
    pub status: String,
    pub created_at: Timestamp,
    pub ward_no: Value,
    pub survey_date: Value,
    pub drone_id: Value,
    pub coordinates: Value,
    #[serde(flatten)]
    pub summary: SurveySummary,
    pub ward_name: String,
    pub incharge_id: Value,
    pub survey_type: String,
}

impl Record for SurveyRecord {
    const ENTITY: &'static str = "Survey";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Everything needed to store a survey. The repository assigns the id,
/// status and creation time.
#[derive(Debug, Clone)]
pub struct CreateSurvey {
    pub survey_data: Value,
    pub drone_data_used: Value,
    pub violations: Vec<Violation>,
    pub regulations_used: RegulationTable,
    pub ward_no: Value,
    pub survey_date: Value,
    pub drone_id: Value,
    pub coordinates: Value,
    pub summary: SurveySummary,
    pub ward_name: String,
    pub incharge_id: Value,
    pub survey_type: String,
}
