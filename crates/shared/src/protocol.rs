use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ExperienceDuration, HealthcareHistory, PatientType};

/// Path appended to the configured base URL for intake submissions.
pub const FORM_SUBMIT_PATH: &str = "/teaching-school/form-submit";

/// JSON body posted to the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub dob: NaiveDate,
    pub healthcare: HealthcareHistory,
    pub experience: ExperienceDuration,
    /// Selected language keys in declaration order, custom language last.
    pub languages: Vec<String>,
    pub patient_types: Vec<PatientType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_keys_and_iso_dates() {
        let payload = SubmissionPayload {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone: "(718) 555-0100".to_string(),
            address: "Kings".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 12, 10).expect("valid date"),
            healthcare: HealthcareHistory::No,
            experience: ExperienceDuration::LessThanThreeMonths,
            languages: vec!["English".to_string()],
            patient_types: vec![PatientType::Adults],
        };

        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.org",
                "phone": "(718) 555-0100",
                "address": "Kings",
                "dob": "1990-12-10",
                "healthcare": "No",
                "experience": "Less than 3 months",
                "languages": ["English"],
                "patientTypes": ["Adults(18-64)"],
            })
        );
    }

    #[test]
    fn response_message_is_optional() {
        let ok: SubmitResponse = serde_json::from_str(r#"{"success":true}"#).expect("json");
        assert_eq!(ok, SubmitResponse::accepted());

        let rejected: SubmitResponse =
            serde_json::from_str(r#"{"success":false,"message":"Duplicate email"}"#)
                .expect("json");
        assert_eq!(rejected, SubmitResponse::rejected("Duplicate email"));
    }
}
