//! Clients for the résumé backend: text enhancement, persistence, and analysis.
//!
//! Every call takes an explicit `AuthContext`. Nothing here keeps a token
//! between calls. Failures are never retried; the caller reports them and
//! leaves the document as it was.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::warn;

pub mod analysis;
pub mod enhancement;
pub mod handlers;
pub mod persistence;

pub use analysis::{AnalysisReport, AnalysisUpload, HttpResumeAnalyzer, ResumeAnalyzer};
pub use enhancement::{EnhanceRequest, HttpTextEnhancer, TextEnhancer};
pub use persistence::{HttpResumeStore, ResumeId, ResumeStore, SavedResume};

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Backend rejected the credentials")]
    Unauthorized,

    #[error("Not found on backend")]
    NotFound,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Bearer credentials forwarded from the caller's `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
}

impl AuthContext {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthContext(Bearer ***)")
    }
}

/// Shared HTTP client for all backend calls.
pub fn build_http_client(timeout: Duration) -> Result<Client, RemoteError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Joins the backend root and a relative endpoint such as `resumes/`.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

/// Maps non-success statuses to `RemoteError`, then decodes the JSON body.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        return Ok(serde_json::from_slice(&body)?);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Backend returned {}: {}", status, body);

    match status.as_u16() {
        401 | 403 => Err(RemoteError::Unauthorized),
        404 => Err(RemoteError::NotFound),
        code => {
            let message = serde_json::from_str::<BackendErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.or(b.detail))
                .unwrap_or(body);
            Err(RemoteError::Api {
                status: code,
                message,
            })
        }
    }
}
