use std::sync::Arc;

use crate::editor::session::SessionStore;
use crate::remote::{ResumeAnalyzer, ResumeStore, TextEnhancer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    /// Backend collaborators. Production uses the HTTP clients; tests swap in fakes.
    pub enhancer: Arc<dyn TextEnhancer>,
    pub resumes: Arc<dyn ResumeStore>,
    pub analyzer: Arc<dyn ResumeAnalyzer>,
}
