pub mod health;
pub mod illegal_constructions;
pub mod regulations;
pub mod surveys;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /surveys                                  list, submit
/// /surveys/{id}                             get
/// /surveys/{id}/violations                  illegal constructions of a survey
///
/// /illegal-constructions                    list
/// /illegal-constructions/{id}/status        update status (PUT)
///
/// /regulations                              active regulation table
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/surveys", surveys::router())
        .nest("/illegal-constructions", illegal_constructions::router())
        .nest("/regulations", regulations::router())
}
