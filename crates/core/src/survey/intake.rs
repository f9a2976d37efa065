//! Survey submission: metadata validation and choice of detection input.
//!
//! A survey arrives as a form document, optionally accompanied by a drone
//! export. When the drone export is a usable document it replaces the form
//! for detection, inheriting any ward/date/drone/coordinate metadata it
//! lacks.

use serde_json::Value;

use super::numeric::is_blank;
use crate::error::CoreError;

/// Metadata every submitted survey must carry.
pub const REQUIRED_SURVEY_FIELDS: &[&str] = &["ward_no", "survey_date", "drone_id", "coordinates"];

/// Check the submitted survey carries all required metadata.
pub fn validate_survey(survey: &Value) -> Result<(), CoreError> {
    let Value::Object(fields) = survey else {
        return Err(CoreError::Validation(
            "survey must be a JSON object".to_string(),
        ));
    };
    for field in REQUIRED_SURVEY_FIELDS {
        if fields.get(*field).map_or(true, is_blank) {
            return Err(CoreError::Validation(format!(
                "Missing required field: {field}"
            )));
        }
    }
    Ok(())
}

/// Where the detection input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// The submitted survey form.
    Survey,
    /// A drone export supplied with the survey.
    DroneData,
}

/// The document violation detection runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionInput {
    pub document: Value,
    pub source: DetectionSource,
    /// Whether drone data was supplied at all, usable or not.
    pub drone_data_supplied: bool,
}

impl DetectionInput {
    /// Pick the detection document for a survey and optional drone export.
    ///
    /// A drone export that is not a JSON object is ignored and the survey
    /// form is used instead.
    pub fn select(survey: &Value, drone_data: Option<&Value>) -> Self {
        let drone_data_supplied = drone_data.is_some();
        match drone_data {
            Some(Value::Object(drone)) => {
                let mut document = drone.clone();
                for field in REQUIRED_SURVEY_FIELDS {
                    if !document.contains_key(*field) {
                        let inherited = survey.get(*field).cloned().unwrap_or(Value::Null);
                        document.insert((*field).to_string(), inherited);
                    }
                }
                Self {
                    document: Value::Object(document),
                    source: DetectionSource::DroneData,
                    drone_data_supplied,
                }
            }
            Some(_) => {
                tracing::warn!("Drone data is not a JSON object, using survey form for detection");
                Self {
                    document: survey.clone(),
                    source: DetectionSource::Survey,
                    drone_data_supplied,
                }
            }
            None => Self {
                document: survey.clone(),
                source: DetectionSource::Survey,
                drone_data_supplied,
            },
        }
    }

    /// A metadata field of the detection document, or `null`.
    pub fn metadata(&self, field: &str) -> Value {
        self.document.get(field).cloned().unwrap_or(Value::Null)
    }

    /// Display name of the surveyed ward, e.g. `Ward 12`.
    pub fn ward_name(&self) -> String {
        match self.metadata("ward_no") {
            Value::String(ward) => format!("Ward {ward}"),
            other => format!("Ward {other}"),
        }
    }

    /// Human-readable survey type.
    pub fn survey_type(&self) -> &'static str {
        if self.drone_data_supplied {
            "Field Survey with Drone Data"
        } else {
            "Manual Field Survey"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn survey() -> Value {
        json!({
            "ward_no": "12",
            "survey_date": "2025-03-01",
            "drone_id": "DR-7",
            "coordinates": "22.71,75.85",
            "buildings": [{"building_id": "form"}]
        })
    }

    #[test]
    fn complete_survey_is_valid() {
        assert!(validate_survey(&survey()).is_ok());
    }

    #[test]
    fn missing_or_empty_metadata_is_rejected() {
        let mut s = survey();
        s.as_object_mut().unwrap().remove("drone_id");
        assert_matches!(
            validate_survey(&s),
            Err(CoreError::Validation(msg)) if msg == "Missing required field: drone_id"
        );

        let mut s = survey();
        s["coordinates"] = json!("");
        assert_matches!(
            validate_survey(&s),
            Err(CoreError::Validation(msg)) if msg.ends_with("coordinates")
        );

        assert_matches!(validate_survey(&json!([1])), Err(CoreError::Validation(_)));
    }

    #[test]
    fn drone_data_replaces_form_and_inherits_metadata() {
        let drone = json!({"ward_no": "14", "buildings": [{"building_id": "drone"}]});
        let input = DetectionInput::select(&survey(), Some(&drone));
        assert_eq!(input.source, DetectionSource::DroneData);
        assert_eq!(input.document["buildings"][0]["building_id"], "drone");
        assert_eq!(input.metadata("ward_no"), json!("14"));
        assert_eq!(input.metadata("drone_id"), json!("DR-7"));
        assert_eq!(input.ward_name(), "Ward 14");
        assert_eq!(input.survey_type(), "Field Survey with Drone Data");
    }

    #[test]
    fn unusable_drone_data_falls_back_to_form() {
        let input = DetectionInput::select(&survey(), Some(&json!([1, 2, 3])));
        assert_eq!(input.source, DetectionSource::Survey);
        assert_eq!(input.document["buildings"][0]["building_id"], "form");
        assert_eq!(input.survey_type(), "Field Survey with Drone Data");
    }

    #[test]
    fn form_only_survey() {
        let input = DetectionInput::select(&survey(), None);
        assert_eq!(input.source, DetectionSource::Survey);
        assert_eq!(input.survey_type(), "Manual Field Survey");
        assert_eq!(input.ward_name(), "Ward 12");
        assert_eq!(input.metadata("missing"), Value::Null);
    }
}
