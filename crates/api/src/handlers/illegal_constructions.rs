//! Handlers for the `/illegal-constructions` resource.

use axum::extract::{Path, State};
use axum::Json;
use garun_db::models::illegal_construction::{IllegalConstructionRecord, UpdateViolationStatus};
use garun_db::repositories::IllegalConstructionRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/illegal-constructions
pub async fn list_illegal_constructions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<IllegalConstructionRecord>>>> {
    let records = IllegalConstructionRepo::list(&state.pool).await;
    Ok(Json(DataResponse { data: records }))
}

/// PUT /api/v1/illegal-constructions/{id}/status
///
/// Record a status change by an officer. Returns 404 if the record is
/// unknown and 400 when status or officer is empty.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateViolationStatus>,
) -> AppResult<Json<DataResponse<IllegalConstructionRecord>>> {
    input.validate()?;
    let record = IllegalConstructionRepo::update_status(&state.pool, &id, &input).await?;
    tracing::info!(id = %record.id, status = %record.status, officer = %input.officer, "Violation status updated");
    Ok(Json(DataResponse { data: record }))
}
