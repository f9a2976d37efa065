//! Record store for surveys and illegal-construction records.
//!
//! Records live in append-only, insertion-ordered logs behind async locks.
//! Repositories follow the usual `Repo::operation(&pool, ...)` shape so the
//! HTTP layer does not care what backs the pool.

use std::sync::Arc;

use chrono::Utc;

pub mod log;
pub mod models;
pub mod repositories;

pub use log::{Record, RecordLog};

use models::illegal_construction::IllegalConstructionRecord;
use models::survey::SurveyRecord;

/// All record logs of the service.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub surveys: RecordLog<SurveyRecord>,
    pub illegal_constructions: RecordLog<IllegalConstructionRecord>,
}

pub type DbPool = Arc<MemoryStore>;

/// Create an empty store.
pub fn create_pool() -> DbPool {
    Arc::new(MemoryStore::default())
}

/// Record counts, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub surveys: usize,
    pub illegal_constructions: usize,
}

/// Confirm the store answers and report its size.
pub async fn health_check(pool: &MemoryStore) -> StoreStats {
    StoreStats {
        surveys: pool.surveys.len().await,
        illegal_constructions: pool.illegal_constructions.len().await,
    }
}

/// Generate a record identifier: `prefix` + UTC `YYYYMMDDHHMMSS` + 8 hex chars.
pub fn generate_id(prefix: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}{stamp}{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_timestamp_and_suffix() {
        let id = generate_id("SUR");
        assert!(id.starts_with("SUR"));
        assert_eq!(id.len(), 3 + 14 + 8);
        assert!(id[3..17].chars().all(|c| c.is_ascii_digit()));
        assert!(id[17..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(generate_id("ILL"), generate_id("ILL"));
    }

    #[tokio::test]
    async fn fresh_store_is_empty() {
        let pool = create_pool();
        assert_eq!(
            health_check(&pool).await,
            StoreStats {
                surveys: 0,
                illegal_constructions: 0
            }
        );
    }
}
