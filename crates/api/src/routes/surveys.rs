//! Route definitions for the `/surveys` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::surveys;
use crate::state::AppState;

/// Routes mounted at `/surveys`.
///
/// ```text
/// GET    /                  -> list_surveys
/// POST   /                  -> start_survey
/// GET    /{id}              -> get_survey
/// GET    /{id}/violations   -> list_survey_violations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(surveys::list_surveys).post(surveys::start_survey))
        .route("/{id}", get(surveys::get_survey))
        .route("/{id}/violations", get(surveys::list_survey_violations))
}
