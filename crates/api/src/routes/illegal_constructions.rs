//! Route definitions for the `/illegal-constructions` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::illegal_constructions;
use crate::state::AppState;

/// Routes mounted at `/illegal-constructions`.
///
/// ```text
/// GET    /               -> list_illegal_constructions
/// PUT    /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(illegal_constructions::list_illegal_constructions))
        .route("/{id}/status", put(illegal_constructions::update_status))
}
