use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::ResumeDocument;
use crate::remote::{decode, endpoint, AuthContext, RemoteError};

/// Opaque résumé id issued by the backend. Usually numeric, kept as-is either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeId::Number(n) => write!(f, "{n}"),
            ResumeId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResume {
    pub id: ResumeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub resume_data: ResumeDocument,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SavedResume {
    fn updated(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    }
}

#[derive(Debug, Serialize)]
struct ResumePayload<'a> {
    title: &'a str,
    resume_data: &'a ResumeDocument,
}

/// Remote résumé storage. The document is sent verbatim.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(
        &self,
        auth: &AuthContext,
        title: &str,
        document: &ResumeDocument,
    ) -> Result<SavedResume, RemoteError>;

    async fn update(
        &self,
        auth: &AuthContext,
        id: &ResumeId,
        title: &str,
        document: &ResumeDocument,
    ) -> Result<SavedResume, RemoteError>;

    async fn load(&self, auth: &AuthContext, id: &ResumeId) -> Result<SavedResume, RemoteError>;

    /// The caller's résumés, most recently updated first.
    async fn list(&self, auth: &AuthContext) -> Result<Vec<SavedResume>, RemoteError>;
}

/// Orders by `updated_at` descending. Entries without a timestamp go last,
/// otherwise the backend's order is kept.
pub fn most_recent_first(mut resumes: Vec<SavedResume>) -> Vec<SavedResume> {
    resumes.sort_by(|a, b| b.updated().cmp(&a.updated()));
    resumes
}

#[derive(Clone)]
pub struct HttpResumeStore {
    client: Client,
    base_url: String,
}

impl HttpResumeStore {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn item_url(&self, id: &ResumeId) -> String {
        endpoint(&self.base_url, &format!("resumes/{id}/"))
    }
}

#[async_trait]
impl ResumeStore for HttpResumeStore {
    async fn create(
        &self,
        auth: &AuthContext,
        title: &str,
        document: &ResumeDocument,
    ) -> Result<SavedResume, RemoteError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "resumes/"))
            .header("authorization", auth.header_value())
            .json(&ResumePayload {
                title,
                resume_data: document,
            })
            .send()
            .await?;

        let saved: SavedResume = decode(response).await?;
        info!(resume_id = %saved.id, "resume created");
        Ok(saved)
    }

    async fn update(
        &self,
        auth: &AuthContext,
        id: &ResumeId,
        title: &str,
        document: &ResumeDocument,
    ) -> Result<SavedResume, RemoteError> {
        let response = self
            .client
            .put(self.item_url(id))
            .header("authorization", auth.header_value())
            .json(&ResumePayload {
                title,
                resume_data: document,
            })
            .send()
            .await?;

        let saved: SavedResume = decode(response).await?;
        info!(resume_id = %saved.id, "resume updated");
        Ok(saved)
    }

    async fn load(&self, auth: &AuthContext, id: &ResumeId) -> Result<SavedResume, RemoteError> {
        let response = self
            .client
            .get(self.item_url(id))
            .header("authorization", auth.header_value())
            .send()
            .await?;
        decode(response).await
    }

    async fn list(&self, auth: &AuthContext) -> Result<Vec<SavedResume>, RemoteError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "resumes/"))
            .header("authorization", auth.header_value())
            .send()
            .await?;
        let resumes: Vec<SavedResume> = decode(response).await?;
        Ok(most_recent_first(resumes))
    }
}
