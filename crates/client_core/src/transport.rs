//! The network collaborator that carries a payload to the intake endpoint.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{SubmissionPayload, SubmitResponse, FORM_SUBMIT_PATH};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, TransportError>;
}

/// `{base}/teaching-school/form-submit`, tolerating a trailing slash on the base.
pub fn submit_endpoint(api_base_url: &Url) -> String {
    format!(
        "{}{FORM_SUBMIT_PATH}",
        api_base_url.as_str().trim_end_matches('/')
    )
}

/// Posts the payload as JSON. No retries and no timeout; the body, not the
/// status code, decides success.
#[derive(Debug, Clone)]
pub struct HttpFormSubmitter {
    http: Client,
    endpoint: String,
}

impl HttpFormSubmitter {
    pub fn new(api_base_url: &Url) -> Self {
        Self::with_client(Client::new(), api_base_url)
    }

    pub fn with_client(http: Client, api_base_url: &Url) -> Self {
        Self {
            http,
            endpoint: submit_endpoint(api_base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormSubmitter for HttpFormSubmitter {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, TransportError> {
        let response = self.http.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "intake endpoint responded");

        serde_json::from_slice(&body).map_err(|source| TransportError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
