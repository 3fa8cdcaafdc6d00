use actix_web::web::Bytes;
use reqwest::Client as HttpClient;
use serde::de::IgnoredAny;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("AI engine unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("AI engine returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("AI engine returned a non-JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Unreachable(e) => e.status().map(|s| s.as_u16()),
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::InvalidBody(_) => None,
        }
    }
}

/// HTTP client for the external AI engine. Cheap to clone; clones share the
/// connection pool.
#[derive(Clone)]
pub struct AiEngineClient {
    http_client: HttpClient,
    base_url: String,
}

impl AiEngineClient {
    pub fn new(base_url: &Url) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs a JSON body and returns the response body untouched once it is
    /// known to be JSON.
    pub async fn post_json(&self, path: &str, body: Bytes) -> Result<Bytes, UpstreamError> {
        let response = self
            .http_client
            .post(self.endpoint(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&payload)?;
        Ok(payload)
    }
}
