//! Receipt-extraction HTTP client.
//!
//! Blocking reqwest client. One submission at a time, never retried — the
//! caller records a failed item once and moves on. 401 is its own variant
//! because the engine must stop the whole batch on a rejected credential.

use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("invproof/", env!("CARGO_PKG_VERSION"));

/// Extraction API client (blocking).
#[derive(Clone)]
pub struct ExtractClient {
    http: reqwest::blocking::Client,
    api_url: String,
    token: String,
}

/// Error type for submissions.
#[derive(Debug)]
pub enum ClientError {
    /// Credential rejected (HTTP 401) — callers abort the batch on this.
    Auth(String),
    /// Any other non-success HTTP status.
    Http(u16, String),
    /// Connection, timeout, or transport error.
    Network(String),
    /// Response body was not valid JSON.
    Parse(String),
    /// Image file could not be read.
    Io(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(msg) => write!(f, "authentication failed (401): {}", msg),
            Self::Http(status, msg) => write!(f, "HTTP {}: {}", status, msg),
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// True when the failure means the credential is invalid or expired.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl ExtractClient {
    /// Create a client for `api_url` authenticating with `token`.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    /// Submit one invoice image and return the extracted fields.
    ///
    /// Multipart upload with the image bytes under the `file` part and
    /// bearer-token auth. 401 maps to [`ClientError::Auth`]; every other
    /// failure is a per-item error for the caller.
    pub fn submit(&self, image: &Path) -> Result<serde_json::Value, ClientError> {
        let bytes = std::fs::read(image).map_err(|e| ClientError::Io(e.to_string()))?;
        let file_name = image
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("invoice.jpg")
            .to_string();

        let part = reqwest::blocking::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::blocking::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 401 {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Auth(if body.is_empty() {
                "token invalid or expired".into()
            } else {
                body
            }));
        }

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http(status.as_u16(), body));
        }

        let text = response
            .text()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))
    }
}
