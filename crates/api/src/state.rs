use std::sync::Arc;

use garun_core::regulation::RegulationTable;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Survey and illegal-construction records.
    pub pool: garun_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Regulation table used for every detection run. Read-only.
    pub regulations: Arc<RegulationTable>,
}
