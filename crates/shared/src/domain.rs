use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownLabel;

/// Lowercased alphanumerics only, so "Elderly (65+)", "Elderly(65+)" and
/// "elderly-65" compare equal.
fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

macro_rules! labelled_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($key:literal, $display:literal, $slug:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            /// Every choice, in form declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label carried on the wire.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn display_label(self) -> &'static str {
                match self {
                    $($name::$variant => $display,)+
                }
            }

            /// Short command-line spelling.
            pub fn slug(self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let wanted = normalize_label(raw);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| {
                        [choice.key(), choice.display_label(), choice.slug()]
                            .iter()
                            .any(|label| normalize_label(label) == wanted)
                    })
                    .ok_or_else(|| {
                        let expected: Vec<&str> = Self::ALL.iter().map(|c| c.slug()).collect();
                        UnknownLabel::new($kind, raw, &expected)
                    })
            }
        }
    };
}

labelled_choice! {
    /// Answer to "worked in the healthcare sector within the last 3 years".
    HealthcareHistory, "healthcare answer" {
        Yes => ("Yes", "Yes", "yes"),
        No => ("No", "No", "no"),
    }
}

labelled_choice! {
    ExperienceDuration, "experience duration" {
        MoreThanThreeMonths => ("More than 3 months", "More than 3 months", "more-than-3-months"),
        LessThanThreeMonths => ("Less than 3 months", "Less than 3 months", "less-than-3-months"),
    }
}

labelled_choice! {
    Language, "language" {
        English => ("English", "English", "english"),
        Bengali => ("Bengali", "Bengali", "bengali"),
        Spanish => ("Spanish", "Spanish", "spanish"),
        Chinese => ("Chinese", "Chinese (Mandarin/Cantonese)", "chinese"),
        Hindi => ("Hindi", "Hindi", "hindi"),
        Other => ("Other", "Other", "other"),
    }
}

labelled_choice! {
    PatientType, "patient type" {
        Elderly => ("Elderly(65+)", "Elderly (65+)", "elderly"),
        Adults => ("Adults(18-64)", "Adults (18-64)", "adults"),
        Children => ("Children(0-17)", "Children (0-17)", "children"),
        IndividualsWithDisabilities => (
            "Individuals with disabilities",
            "Individuals with disabilities",
            "disabilities"
        ),
    }
}

/// Form controls that can carry an inline message, ordered by form position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    Languages,
    Phone,
    Address,
    Healthcare,
    Experience,
    PatientTypes,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Email => "Email",
            FormField::DateOfBirth => "Date of Birth",
            FormField::Languages => "Language(s) Spoken",
            FormField::Phone => "Phone Number",
            FormField::Address => "County",
            FormField::Healthcare => {
                "Have you worked in the healthcare sector within the last 3 years?"
            }
            FormField::Experience => "Duration of your experience",
            FormField::PatientTypes => "What type of patients did you care for?",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_keep_declaration_order() {
        let keys: Vec<&str> = Language::ALL.iter().map(|l| l.key()).collect();
        assert_eq!(
            keys,
            ["English", "Bengali", "Spanish", "Chinese", "Hindi", "Other"]
        );

        let keys: Vec<&str> = PatientType::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(
            keys,
            [
                "Elderly(65+)",
                "Adults(18-64)",
                "Children(0-17)",
                "Individuals with disabilities"
            ]
        );
    }

    #[test]
    fn parses_keys_display_labels_and_slugs() {
        assert_eq!("Elderly(65+)".parse::<PatientType>(), Ok(PatientType::Elderly));
        assert_eq!("Elderly (65+)".parse::<PatientType>(), Ok(PatientType::Elderly));
        assert_eq!("disabilities".parse::<PatientType>(), Ok(PatientType::IndividualsWithDisabilities));
        assert_eq!(
            "less-than-3-months".parse::<ExperienceDuration>(),
            Ok(ExperienceDuration::LessThanThreeMonths)
        );
        assert_eq!("YES".parse::<HealthcareHistory>(), Ok(HealthcareHistory::Yes));
        assert_eq!(
            "Chinese (Mandarin/Cantonese)".parse::<Language>(),
            Ok(Language::Chinese)
        );
    }

    #[test]
    fn rejects_unknown_label_with_expected_choices() {
        let err = "klingon".parse::<Language>().expect_err("not a listed language");
        assert_eq!(err.kind, "language");
        assert!(err.to_string().contains("english, bengali"));
        assert!("".parse::<HealthcareHistory>().is_err());
    }

    #[test]
    fn serializes_choices_as_wire_keys() {
        let json = serde_json::to_string(&ExperienceDuration::MoreThanThreeMonths).expect("json");
        assert_eq!(json, "\"More than 3 months\"");

        let parsed: PatientType =
            serde_json::from_str("\"Children(0-17)\"").expect("known patient type");
        assert_eq!(parsed, PatientType::Children);
    }
}
