use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::remote::{decode, endpoint, AuthContext, RemoteError};

/// An uploaded résumé file plus the role it is scored against.
#[derive(Debug, Clone)]
pub struct AnalysisUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub job_role: String,
    pub job_description: Option<String>,
}

/// Scores and keyword lists from the analysis service. Unknown keys are kept
/// so the report can be passed back to the client unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    pub success: bool,
    pub job_role_selected: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_skills: Vec<String>,
    pub role_matching_skills: Vec<String>,
    pub role_missing_skills: Vec<String>,
    pub jd_matching_skills: Vec<String>,
    pub jd_missing_skills: Vec<String>,
    pub ats_score_general: Option<f64>,
    pub ats_score_role: Option<f64>,
    pub ats_score_jd: Option<f64>,
    pub analysis_summary: Option<String>,
    pub quality_feedback: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        auth: &AuthContext,
        upload: AnalysisUpload,
    ) -> Result<AnalysisReport, RemoteError>;
}

#[derive(Clone)]
pub struct HttpResumeAnalyzer {
    client: Client,
    base_url: String,
}

impl HttpResumeAnalyzer {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

fn build_form(upload: AnalysisUpload) -> Result<multipart::Form, RemoteError> {
    let mut file = multipart::Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name);
    if let Some(mime) = upload.content_type {
        file = file.mime_str(&mime)?;
    }

    let mut form = multipart::Form::new()
        .part("resume_file", file)
        .text("job_role", upload.job_role);
    if let Some(jd) = upload.job_description.filter(|jd| !jd.trim().is_empty()) {
        form = form.text("job_description", jd);
    }
    Ok(form)
}

#[async_trait]
impl ResumeAnalyzer for HttpResumeAnalyzer {
    async fn analyze(
        &self,
        auth: &AuthContext,
        upload: AnalysisUpload,
    ) -> Result<AnalysisReport, RemoteError> {
        let role = upload.job_role.clone();
        let response = self
            .client
            .post(endpoint(&self.base_url, "analyze/"))
            .header("authorization", auth.header_value())
            .multipart(build_form(upload)?)
            .send()
            .await?;

        let report: AnalysisReport = decode(response).await?;
        info!(
            job_role = %role,
            success = report.success,
            ats_score_general = ?report.ats_score_general,
            "analysis complete"
        );
        Ok(report)
    }
}
