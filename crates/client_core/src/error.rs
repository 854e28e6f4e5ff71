use thiserror::Error;

use crate::validation::FieldErrors;

/// Why the intake endpoint could not produce a usable answer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to intake endpoint failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("intake endpoint answered HTTP {status} with a body that is not a submit response: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("intake endpoint unavailable: {0}")]
    Unavailable(String),
}

/// Submit attempts that stop before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("form has {} field(s) needing attention", .0.len())]
    Invalid(FieldErrors),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no intake API base URL configured; set INTAKE_API_URL or api_base_url in intake.toml")]
    MissingBaseUrl,
    #[error("invalid intake API base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("intake API base URL must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}
