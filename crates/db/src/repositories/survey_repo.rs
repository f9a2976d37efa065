//! Repository for completed surveys.

use chrono::Utc;
use garun_core::error::CoreError;

use crate::models::illegal_construction::{IllegalConstructionRecord, ViolationContext};
use crate::models::survey::{CreateSurvey, SurveyRecord, SURVEY_STATUS_COMPLETED};
use crate::repositories::IllegalConstructionRepo;
use crate::{generate_id, MemoryStore};

/// Prefix of survey identifiers.
pub const SURVEY_ID_PREFIX: &str = "SUR";

/// Provides storage operations for surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Store a survey, assigning its id, status and creation time.
    pub async fn create(pool: &MemoryStore, input: CreateSurvey) -> Result<SurveyRecord, CoreError> {
        pool.surveys.append(Self::build(input)).await
    }

    /// Store a survey and one illegal-construction record per violation it
    /// carries. Either everything is stored or nothing is.
    pub async fn create_with_violations(
        pool: &MemoryStore,
        input: CreateSurvey,
    ) -> Result<(SurveyRecord, Vec<IllegalConstructionRecord>), CoreError> {
        let survey = Self::build(input);
        let records = IllegalConstructionRepo::build_batch(
            &ViolationContext::for_survey(&survey),
            &survey.violations,
        );

        // Lock order: surveys, then illegal constructions.
        let mut surveys = pool.surveys.writer().await;
        let mut illegal_constructions = pool.illegal_constructions.writer().await;
        surveys.check_vacant(std::slice::from_ref(&survey))?;
        illegal_constructions.check_vacant(&records)?;

        tracing::debug!(
            survey_id = %survey.id,
            count = records.len(),
            "Recording illegal constructions"
        );
        let records = illegal_constructions.push_all(records)?;
        surveys.push_all(vec![survey.clone()])?;
        Ok((survey, records))
    }

    fn build(input: CreateSurvey) -> SurveyRecord {
        SurveyRecord {
            id: generate_id(SURVEY_ID_PREFIX),
            survey_data: input.survey_data,
            drone_data_used: input.drone_data_used,
            violations: input.violations,
            regulations_used: input.regulations_used,
            status: SURVEY_STATUS_COMPLETED.to_string(),
            created_at: Utc::now(),
            ward_no: input.ward_no,
            survey_date: input.survey_date,
            drone_id: input.drone_id,
            coordinates: input.coordinates,
            summary: input.summary,
            ward_name: input.ward_name,
            incharge_id: input.incharge_id,
            survey_type: input.survey_type,
        }
    }

    pub async fn find_by_id(pool: &MemoryStore, id: &str) -> Option<SurveyRecord> {
        pool.surveys.find_by_id(id).await
    }

    /// All surveys, oldest first.
    pub async fn list(pool: &MemoryStore) -> Vec<SurveyRecord> {
        pool.surveys.list().await
    }
}
