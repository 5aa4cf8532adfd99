//! In-memory collaborators and helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;
use tokio::sync::Notify;

use crate::editor::session::SessionStore;
use crate::models::ResumeDocument;
use crate::remote::{
    AnalysisReport, AnalysisUpload, AuthContext, EnhanceRequest, RemoteError, ResumeAnalyzer,
    ResumeId, ResumeStore, SavedResume, TextEnhancer,
};
use crate::state::AppState;

pub fn test_state() -> AppState {
    AppState {
        sessions: Arc::new(SessionStore::default()),
        enhancer: Arc::new(FakeEnhancer::default()),
        resumes: Arc::new(FakeResumeStore::default()),
        analyzer: Arc::new(FakeAnalyzer::default()),
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Answers `"Enhanced: {text}"`. A gated enhancer parks each call until `release`.
#[derive(Default)]
pub struct FakeEnhancer {
    gate: Option<(Notify, Notify)>,
}

impl FakeEnhancer {
    pub fn gated() -> Self {
        Self {
            gate: Some((Notify::new(), Notify::new())),
        }
    }

    pub async fn wait_for_call(&self) {
        if let Some((called, _)) = &self.gate {
            called.notified().await;
        }
    }

    pub fn release(&self) {
        if let Some((_, release)) = &self.gate {
            release.notify_one();
        }
    }
}

#[async_trait]
impl TextEnhancer for FakeEnhancer {
    async fn enhance(
        &self,
        _auth: &AuthContext,
        request: EnhanceRequest,
    ) -> Result<String, RemoteError> {
        if let Some((called, release)) = &self.gate {
            called.notify_one();
            release.notified().await;
        }
        Ok(format!("Enhanced: {}", request.text))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create { title: String },
    Update { id: ResumeId, title: String },
}

#[derive(Default)]
pub struct FakeResumeStore {
    saved: Mutex<Vec<SavedResume>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl FakeResumeStore {
    pub fn seed(&self, id: i64, title: &str, data: Value) {
        let resume_data: ResumeDocument = serde_json::from_value(data).unwrap();
        self.saved.lock().unwrap().push(SavedResume {
            id: ResumeId::Number(id),
            title: title.to_string(),
            resume_data,
            created_at: None,
            updated_at: None,
        });
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeStore for FakeResumeStore {
    async fn create(
        &self,
        _auth: &AuthContext,
        title: &str,
        document: &ResumeDocument,
    ) -> Result<SavedResume, RemoteError> {
        // Give a concurrent save the chance to run while this one is "remote".
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(StoreCall::Create {
            title: title.to_string(),
        });
        let mut saved = self.saved.lock().unwrap();
        let resume = SavedResume {
            id: ResumeId::Number(saved.len() as i64 + 1),
            title: title.to_string(),
            resume_data: document.clone(),
            created_at: None,
            updated_at: None,
        };
        saved.push(resume.clone());
        Ok(resume)
    }

    async fn update(
        &self,
        _auth: &AuthContext,
        id: &ResumeId,
        title: &str,
        document: &ResumeDocument,
    ) -> Result<SavedResume, RemoteError> {
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(StoreCall::Update {
            id: id.clone(),
            title: title.to_string(),
        });
        let mut saved = self.saved.lock().unwrap();
        let resume = saved
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or(RemoteError::NotFound)?;
        resume.title = title.to_string();
        resume.resume_data = document.clone();
        Ok(resume.clone())
    }

    async fn load(&self, _auth: &AuthContext, id: &ResumeId) -> Result<SavedResume, RemoteError> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn list(&self, _auth: &AuthContext) -> Result<Vec<SavedResume>, RemoteError> {
        Ok(self.saved.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct FakeAnalyzer {
    uploads: Mutex<Vec<AnalysisUpload>>,
}

impl FakeAnalyzer {
    pub fn uploads(&self) -> Vec<AnalysisUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeAnalyzer for FakeAnalyzer {
    async fn analyze(
        &self,
        _auth: &AuthContext,
        upload: AnalysisUpload,
    ) -> Result<AnalysisReport, RemoteError> {
        let report = AnalysisReport {
            success: true,
            job_role_selected: Some(upload.job_role.clone()),
            ats_score_general: Some(70.0),
            ..Default::default()
        };
        self.uploads.lock().unwrap().push(upload);
        Ok(report)
    }
}
