//! Handlers for the `/surveys` resource.
//!
//! Submitting a survey validates its metadata, picks the detection input
//! (drone export or form), runs violation detection, and stores the survey
//! together with one illegal-construction record per violation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use garun_core::error::CoreError;
use garun_core::survey::intake::{validate_survey, DetectionInput};
use garun_core::survey::summary::SurveySummary;
use garun_core::survey::{detect_violations, Violation};
use garun_db::models::illegal_construction::IllegalConstructionRecord;
use garun_db::models::survey::{CreateSurvey, SurveyRecord, UNKNOWN_INCHARGE};
use garun_db::repositories::{IllegalConstructionRepo, SurveyRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for submitting a survey.
#[derive(Debug, Deserialize)]
pub struct StartSurveyRequest {
    /// The survey form document.
    pub survey: Value,
    /// Optional drone export used for detection instead of the form.
    #[serde(default)]
    pub drone_data: Option<Value>,
}

/// Result of a survey submission.
#[derive(Debug, Serialize)]
pub struct SurveyOutcome {
    pub survey_id: String,
    pub survey: SurveyRecord,
    pub violations: Vec<Violation>,
    pub summary: SurveySummary,
    pub illegal_constructions: Vec<IllegalConstructionRecord>,
}

/// POST /api/v1/surveys
///
/// Returns 201 with the stored survey, its violations and summary.
/// Returns 400 when the survey lacks required metadata.
pub async fn start_survey(
    State(state): State<AppState>,
    Json(input): Json<StartSurveyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SurveyOutcome>>)> {
    validate_survey(&input.survey)?;

    let detection = DetectionInput::select(&input.survey, input.drone_data.as_ref());
    tracing::debug!(source = ?detection.source, "Detection input selected");

    let violations = detect_violations(&detection.document, &state.regulations);
    let summary = SurveySummary::compute(&detection.document, &violations);

    let (survey, illegal_constructions) = SurveyRepo::create_with_violations(
        &state.pool,
        CreateSurvey {
            survey_data: input.survey.clone(),
            drone_data_used: detection.document.clone(),
            violations: violations.clone(),
            regulations_used: state.regulations.as_ref().clone(),
            ward_no: detection.metadata("ward_no"),
            survey_date: detection.metadata("survey_date"),
            drone_id: detection.metadata("drone_id"),
            coordinates: detection.metadata("coordinates"),
            summary: summary.clone(),
            ward_name: detection.ward_name(),
            incharge_id: input
                .survey
                .get("incharge_id")
                .cloned()
                .unwrap_or_else(|| Value::String(UNKNOWN_INCHARGE.to_string())),
            survey_type: detection.survey_type().to_string(),
        },
    )
    .await?;

    tracing::info!(
        survey_id = %survey.id,
        violations = violations.len(),
        compliance_score = summary.compliance_score,
        "Survey completed"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SurveyOutcome {
                survey_id: survey.id.clone(),
                survey,
                violations,
                summary,
                illegal_constructions,
            },
        }),
    ))
}

/// GET /api/v1/surveys
pub async fn list_surveys(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SurveyRecord>>>> {
    let surveys = SurveyRepo::list(&state.pool).await;
    Ok(Json(DataResponse { data: surveys }))
}

/// GET /api/v1/surveys/{id}
///
/// Returns 404 if the survey is unknown.
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<SurveyRecord>>> {
    let survey = SurveyRepo::find_by_id(&state.pool, &id)
        .await
        .ok_or(CoreError::NotFound { entity: "Survey", id })?;
    Ok(Json(DataResponse { data: survey }))
}

/// GET /api/v1/surveys/{id}/violations
///
/// Illegal-construction records detected by one survey. Returns 404 if the
/// survey is unknown.
pub async fn list_survey_violations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<IllegalConstructionRecord>>>> {
    if SurveyRepo::find_by_id(&state.pool, &id).await.is_none() {
        return Err(CoreError::NotFound { entity: "Survey", id }.into());
    }
    let records = IllegalConstructionRepo::list_by_survey(&state.pool, &id).await;
    Ok(Json(DataResponse { data: records }))
}
