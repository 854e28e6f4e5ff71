use std::{collections::HashMap, fs, io::ErrorKind};

use url::Url;

use crate::{error::ConfigError, transport::submit_endpoint};

pub const SETTINGS_FILE: &str = "intake.toml";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct IntakeSettings {
    pub api_base_url: Url,
    pub log_filter: String,
}

impl IntakeSettings {
    pub fn submit_endpoint(&self) -> String {
        submit_endpoint(&self.api_base_url)
    }
}

/// Reads `intake.toml` from the working directory (when present), then the
/// environment, then `api_url_override`, each layer winning over the last.
pub fn load_settings(api_url_override: Option<&str>) -> Result<IntakeSettings, ConfigError> {
    let file = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(source) => {
            return Err(ConfigError::Read {
                path: SETTINGS_FILE.to_string(),
                source,
            })
        }
    };

    settings_from_sources(
        file.as_deref(),
        |key| std::env::var(key).ok(),
        api_url_override,
    )
}

pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    api_url_override: Option<&str>,
) -> Result<IntakeSettings, ConfigError> {
    let mut api_base_url: Option<String> = None;
    let mut log_filter = DEFAULT_LOG_FILTER.to_string();

    if let Some(raw) = file {
        let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
        if let Some(v) = file_cfg.get("api_base_url") {
            api_base_url = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("log_filter") {
            log_filter = v.clone();
        }
    }

    if let Some(v) = env("INTAKE_API_URL") {
        api_base_url = Some(v);
    }
    if let Some(v) = env("APP__API_URL") {
        api_base_url = Some(v);
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        log_filter = v;
    }

    if let Some(v) = api_url_override {
        api_base_url = Some(v.to_string());
    }

    let raw = api_base_url
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingBaseUrl)?;

    Ok(IntakeSettings {
        api_base_url: parse_base_url(&raw)?,
        log_filter,
    })
}

pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn base_url_is_required() {
        let err = settings_from_sources(None, no_env, None).expect_err("no url anywhere");
        assert!(matches!(err, ConfigError::MissingBaseUrl));

        let err = settings_from_sources(Some("api_base_url = \"  \""), no_env, None)
            .expect_err("blank url");
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn file_values_apply_with_default_log_filter() {
        let settings = settings_from_sources(
            Some("api_base_url = \"https://api.example.org\"\n"),
            no_env,
            None,
        )
        .expect("settings");
        assert_eq!(
            settings.submit_endpoint(),
            "https://api.example.org/teaching-school/form-submit"
        );
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn env_beats_file_and_override_beats_env() {
        let file = "api_base_url = \"https://file.example.org\"\nlog_filter = \"warn\"\n";
        let env = |key: &str| match key {
            "INTAKE_API_URL" => Some("https://env.example.org".to_string()),
            "APP__LOG_FILTER" => Some("client_core=debug".to_string()),
            _ => None,
        };

        let settings = settings_from_sources(Some(file), env, None).expect("settings");
        assert_eq!(settings.api_base_url.host_str(), Some("env.example.org"));
        assert_eq!(settings.log_filter, "client_core=debug");

        let settings = settings_from_sources(Some(file), env, Some("http://127.0.0.1:9000"))
            .expect("settings");
        assert_eq!(settings.api_base_url.port(), Some(9000));
    }

    #[test]
    fn rejects_unparseable_and_non_http_urls() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://files.example.org"),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn malformed_settings_file_is_a_parse_error() {
        let err = settings_from_sources(Some("api_base_url = ["), no_env, None)
            .expect_err("broken toml");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
