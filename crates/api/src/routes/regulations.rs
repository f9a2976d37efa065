use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use garun_core::regulation::RegulationTable;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/regulations -- the regulation table detection runs against.
async fn get_regulations(State(state): State<AppState>) -> Json<DataResponse<RegulationTable>> {
    Json(DataResponse {
        data: state.regulations.as_ref().clone(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_regulations))
}
