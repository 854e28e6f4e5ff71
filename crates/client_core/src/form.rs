//! Typed form state, the derived group selectors, and payload assembly.

use shared::{
    domain::{ExperienceDuration, HealthcareHistory, Language, PatientType},
    protocol::SubmissionPayload,
};

use crate::validation::parse_dob;

macro_rules! checkbox_group {
    (
        $(#[$meta:meta])*
        $name:ident($choice:ident) {
            $($field:ident => $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: bool,)+
        }

        impl $name {
            pub fn is_selected(&self, choice: $choice) -> bool {
                match choice {
                    $($choice::$variant => self.$field,)+
                }
            }

            pub fn flag_mut(&mut self, choice: $choice) -> &mut bool {
                match choice {
                    $($choice::$variant => &mut self.$field,)+
                }
            }

            pub fn set(&mut self, choice: $choice, selected: bool) {
                *self.flag_mut(choice) = selected;
            }

            pub fn any(&self) -> bool {
                $choice::ALL.iter().any(|choice| self.is_selected(*choice))
            }

            /// Checked choices in declaration order, whatever order they were toggled in.
            pub fn selected(&self) -> impl Iterator<Item = $choice> + '_ {
                $choice::ALL
                    .iter()
                    .copied()
                    .filter(move |choice| self.is_selected(*choice))
            }
        }
    };
}

checkbox_group! {
    LanguageFlags(Language) {
        english => English,
        bengali => Bengali,
        spanish => Spanish,
        chinese => Chinese,
        hindi => Hindi,
        other => Other,
    }
}

checkbox_group! {
    PatientTypeFlags(PatientType) {
        elderly => Elderly,
        adults => Adults,
        children => Children,
        individuals_with_disabilities => IndividualsWithDisabilities,
    }
}

/// Everything the user has typed or toggled. Empty on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Shown as "County".
    pub address: String,
    /// Raw `YYYY-MM-DD` text as entered.
    pub dob: String,
    pub healthcare: Option<HealthcareHistory>,
    pub experience: Option<ExperienceDuration>,
    pub languages: LanguageFlags,
    /// Only read while `languages.other` is checked.
    pub other_language: String,
    pub patient_types: PatientTypeFlags,
}

impl FormValues {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn has_language(values: &FormValues) -> bool {
    values.languages.any()
}

pub fn has_patient_type(values: &FormValues) -> bool {
    values.patient_types.any()
}

/// The trimmed custom language, when "Other" is checked and something was typed.
fn custom_language(values: &FormValues) -> Option<&str> {
    let custom = values.other_language.trim();
    (values.languages.other && !custom.is_empty()).then_some(custom)
}

/// Selected language keys in declaration order. A typed custom language goes
/// last in place of the bare "Other" key.
pub fn language_sequence(values: &FormValues) -> Vec<String> {
    let custom = custom_language(values);
    let mut languages: Vec<String> = values
        .languages
        .selected()
        .filter(|language| !(*language == Language::Other && custom.is_some()))
        .map(|language| language.key().to_string())
        .collect();

    if let Some(custom) = custom {
        languages.push(custom.to_string());
    }
    languages
}

pub fn patient_type_sequence(values: &FormValues) -> Vec<PatientType> {
    values.patient_types.selected().collect()
}

/// Builds the wire payload, or `None` when a group is empty or a required
/// choice or date is missing.
pub fn assemble_payload(values: &FormValues) -> Option<SubmissionPayload> {
    if !has_language(values) || !has_patient_type(values) {
        return None;
    }

    Some(SubmissionPayload {
        first_name: values.first_name.clone(),
        last_name: values.last_name.clone(),
        email: values.email.trim().to_string(),
        phone: values.phone.clone(),
        address: values.address.clone(),
        dob: parse_dob(&values.dob)?,
        healthcare: values.healthcare?,
        experience: values.experience?,
        languages: language_sequence(values),
        patient_types: patient_type_sequence(values),
    })
}
