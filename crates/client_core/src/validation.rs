//! Pure field-level validation: form state in, inline messages out.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::domain::FormField;
use validator::ValidateEmail;

use crate::form::{has_language, has_patient_type, FormValues};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid date (YYYY-MM-DD)";
pub const SELECT_OPTION_MESSAGE: &str = "Please select an option";
pub const SELECT_LANGUAGE_MESSAGE: &str = "Please select at least one language";
pub const SELECT_PATIENT_TYPE_MESSAGE: &str = "Please select at least one patient type";

const DOB_FORMAT: &str = "%Y-%m-%d";

/// At most one message per field, iterated in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, &'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.errors.entry(field).or_insert(message);
    }
}

pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DOB_FORMAT).ok()
}

fn require_text(errors: &mut FieldErrors, field: FormField, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, REQUIRED_MESSAGE);
        false
    } else {
        true
    }
}

/// Warnings for the two checkbox groups. Recomputed on every change and shown
/// before any submit attempt.
pub fn group_warnings(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if !has_language(values) {
        errors.insert(FormField::Languages, SELECT_LANGUAGE_MESSAGE);
    }
    if !has_patient_type(values) {
        errors.insert(FormField::PatientTypes, SELECT_PATIENT_TYPE_MESSAGE);
    }
    errors
}

/// Every rule at once. An empty result means a payload can be assembled.
pub fn validate(values: &FormValues) -> FieldErrors {
    let mut errors = group_warnings(values);

    require_text(&mut errors, FormField::FirstName, &values.first_name);
    require_text(&mut errors, FormField::LastName, &values.last_name);
    if require_text(&mut errors, FormField::Email, &values.email)
        && !values.email.trim().validate_email()
    {
        errors.insert(FormField::Email, INVALID_EMAIL_MESSAGE);
    }
    if require_text(&mut errors, FormField::DateOfBirth, &values.dob)
        && parse_dob(&values.dob).is_none()
    {
        errors.insert(FormField::DateOfBirth, INVALID_DATE_MESSAGE);
    }
    require_text(&mut errors, FormField::Phone, &values.phone);
    require_text(&mut errors, FormField::Address, &values.address);

    if values.healthcare.is_none() {
        errors.insert(FormField::Healthcare, SELECT_OPTION_MESSAGE);
    }
    if values.experience.is_none() {
        errors.insert(FormField::Experience, SELECT_OPTION_MESSAGE);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{ExperienceDuration, HealthcareHistory};

    fn complete_values() -> FormValues {
        let mut values = FormValues {
            first_name: "Maya".to_string(),
            last_name: "Rahman".to_string(),
            email: "maya@example.org".to_string(),
            phone: "(347) 555-0123".to_string(),
            address: "Queens".to_string(),
            dob: "1994-07-02".to_string(),
            healthcare: Some(HealthcareHistory::Yes),
            experience: Some(ExperienceDuration::LessThanThreeMonths),
            ..FormValues::default()
        };
        values.languages.bengali = true;
        values.patient_types.elderly = true;
        values
    }

    #[test]
    fn complete_form_has_no_errors() {
        assert!(validate(&complete_values()).is_empty());
    }

    #[test]
    fn empty_form_reports_every_field_in_form_order() {
        let errors = validate(&FormValues::default());
        let fields: Vec<FormField> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            [
                FormField::FirstName,
                FormField::LastName,
                FormField::Email,
                FormField::DateOfBirth,
                FormField::Languages,
                FormField::Phone,
                FormField::Address,
                FormField::Healthcare,
                FormField::Experience,
                FormField::PatientTypes,
            ]
        );
        assert_eq!(errors.get(FormField::FirstName), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get(FormField::Healthcare), Some(SELECT_OPTION_MESSAGE));
        assert_eq!(errors.get(FormField::Experience), Some(SELECT_OPTION_MESSAGE));
        assert_eq!(errors.get(FormField::Languages), Some(SELECT_LANGUAGE_MESSAGE));
        assert_eq!(
            errors.get(FormField::PatientTypes),
            Some(SELECT_PATIENT_TYPE_MESSAGE)
        );
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        let mut values = complete_values();
        values.address = "  \t".to_string();
        let errors = validate(&values);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Address), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn malformed_email_and_date_get_specific_messages() {
        let mut values = complete_values();
        values.email = "maya.example.org".to_string();
        values.dob = "07/02/1994".to_string();
        let errors = validate(&values);
        assert_eq!(errors.get(FormField::Email), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(errors.get(FormField::DateOfBirth), Some(INVALID_DATE_MESSAGE));

    }

    #[test]
    fn email_must_match_the_html_email_rule() {
        let mut values = complete_values();
        for bad in [
            "@example.org",
            "maya@",
            "ma ya@example.org",
            "a@b@c",
            "a@.org",
            "a@b..c",
            "a@-b.com",
            "a@b_c.com",
            "a@b.c-",
            "(x)@y.org",
        ] {
            values.email = bad.to_string();
            assert_eq!(
                validate(&values).get(FormField::Email),
                Some(INVALID_EMAIL_MESSAGE),
                "{bad} should be rejected"
            );
        }

        for good in ["a@localhost", "first.last+intake@mail.example.org", "  a@b.co  "] {
            values.email = good.to_string();
            assert!(validate(&values).is_empty(), "{good} should be accepted");
        }
    }

    #[test]
    fn group_warnings_only_cover_checkbox_groups() {
        let mut values = FormValues::default();
        let warnings = group_warnings(&values);
        assert_eq!(warnings.len(), 2);

        values.languages.spanish = true;
        let warnings = group_warnings(&values);
        assert!(!warnings.contains(FormField::Languages));
        assert!(warnings.contains(FormField::PatientTypes));

        values.patient_types.individuals_with_disabilities = true;
        assert!(group_warnings(&values).is_empty());
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_dob(" 2001-02-28 "),
            NaiveDate::from_ymd_opt(2001, 2, 28)
        );
        assert!(parse_dob("2001-02-30").is_none());
        assert!(parse_dob("").is_none());
    }
}
