//! Repository for illegal-construction records.

use chrono::Utc;
use garun_core::error::CoreError;
use garun_core::survey::Violation;

use crate::models::illegal_construction::{
    IllegalConstructionRecord, StatusUpdateEntry, UpdateViolationStatus, ViolationContext,
    STATUS_RESOLVED,
};
use crate::{generate_id, MemoryStore};

/// Prefix of illegal-construction identifiers.
pub const ILLEGAL_CONSTRUCTION_ID_PREFIX: &str = "ILL";

/// Provides storage operations for illegal-construction records.
pub struct IllegalConstructionRepo;

impl IllegalConstructionRepo {
    /// Store one record per violation, in violation order.
    pub async fn create_batch(
        pool: &MemoryStore,
        context: &ViolationContext,
        violations: &[Violation],
    ) -> Result<Vec<IllegalConstructionRecord>, CoreError> {
        let records = Self::build_batch(context, violations);
        tracing::debug!(
            survey_id = %context.survey_id,
            count = records.len(),
            "Recording illegal constructions"
        );
        pool.illegal_constructions.append_all(records).await
    }

    /// Fresh records for `violations` sharing one detection time. Nothing is
    /// stored.
    pub fn build_batch(
        context: &ViolationContext,
        violations: &[Violation],
    ) -> Vec<IllegalConstructionRecord> {
        let detected_at = Utc::now();
        violations
            .iter()
            .map(|violation| {
                IllegalConstructionRecord::detected(
                    generate_id(ILLEGAL_CONSTRUCTION_ID_PREFIX),
                    violation,
                    context,
                    detected_at,
                )
            })
            .collect()
    }

    pub async fn list(pool: &MemoryStore) -> Vec<IllegalConstructionRecord> {
        pool.illegal_constructions.list().await
    }

    /// Records detected by one survey.
    pub async fn list_by_survey(
        pool: &MemoryStore,
        survey_id: &str,
    ) -> Vec<IllegalConstructionRecord> {
        pool.illegal_constructions
            .filter(|record| record.survey_id == survey_id)
            .await
    }

    /// Apply a status change and append it to the record's timeline.
    pub async fn update_status(
        pool: &MemoryStore,
        id: &str,
        input: &UpdateViolationStatus,
    ) -> Result<IllegalConstructionRecord, CoreError> {
        let now = Utc::now();
        pool.illegal_constructions
            .update_by_id(id, |record| {
                record.status = input.status.clone();
                record.last_updated = Some(now);
                record.updated_by = Some(input.officer.clone());
                record.action_taken = Some(input.action_taken.clone());
                record.updates.push(StatusUpdateEntry {
                    date: now,
                    status: input.status.clone(),
                    message: input.message.clone(),
                    officer: input.officer.clone(),
                    action: input.action_taken.clone(),
                });
                if input.status == STATUS_RESOLVED {
                    record.resolved_at = Some(now);
                }
            })
            .await
    }
}
