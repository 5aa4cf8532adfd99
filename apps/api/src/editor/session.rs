use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::editor::enhance::EnhancementTracker;
use crate::editor::theme::AccentTheme;
use crate::editor::wizard::{StepWizard, WizardView};
use crate::models::{filled, ResumeDocument};
use crate::remote::{ResumeId, SavedResume};
use crate::render::Variant;
use crate::resume::skills::dedup_skills;
use crate::resume::{reduce, Action, EditError, FieldPath};

pub const DEFAULT_TITLE: &str = "My Resume";

/// Transient editor state for one résumé. Dropped when the session ends.
#[derive(Debug)]
pub struct EditorSession {
    pub id: Uuid,
    pub title: String,
    pub resume_id: Option<ResumeId>,
    pub document: ResumeDocument,
    pub wizard: StepWizard,
    pub theme: AccentTheme,
    pub variant: Variant,
    pub tracker: EnhancementTracker,
    /// Held for the whole remote save so saves never interleave.
    pub save_lock: Arc<Mutex<()>>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every mutation; idle sessions are swept by `run_idle_sweep`.
    pub last_active: DateTime<Utc>,
}

impl EditorSession {
    pub fn new(title: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            resume_id: None,
            document: ResumeDocument::default(),
            wizard: StepWizard::default(),
            theme: AccentTheme::default(),
            variant: Variant::default(),
            tracker: EnhancementTracker::default(),
            save_lock: Arc::new(Mutex::new(())),
            created_at: now,
            last_active: now,
        }
    }

    /// Opens a saved résumé for editing. Duplicate skills in old data are folded.
    pub fn from_saved(saved: SavedResume) -> Self {
        let mut session = Self::new(Some(saved.title));
        let mut document = saved.resume_data;
        document.skills = dedup_skills(&document.skills);
        session.document = document;
        session.resume_id = Some(saved.id);
        session
    }

    /// Applies one edit. On error neither the document nor the tracker changes.
    pub fn apply(&mut self, action: Action) -> Result<(), EditError> {
        let mut tracker = self.tracker.clone();
        tracker.observe(&action);
        self.document = reduce(&self.document, action)?;
        self.tracker = tracker;
        Ok(())
    }

    /// Title sent with a save: the session title on create, `"{name}'s Resume"` on update.
    pub fn save_title(&self) -> String {
        if self.resume_id.is_none() {
            return self.title.clone();
        }
        filled(&self.document.personal_info.name)
            .map(|name| format!("{name}'s Resume"))
            .unwrap_or_else(|| self.title.clone())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            title: self.title.clone(),
            resume_id: self.resume_id.clone(),
            document: self.document.clone(),
            wizard: WizardView::from(&self.wizard),
            template: self.variant,
            accent_color: self.theme.color().to_string(),
            pending_enhancements: self.tracker.pending(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub title: String,
    pub resume_id: Option<ResumeId>,
    pub document: ResumeDocument,
    pub wizard: WizardView,
    pub template: Variant,
    pub accent_color: String,
    pub pending_enhancements: Vec<FieldPath>,
    pub created_at: DateTime<Utc>,
}

/// In-memory session registry. Closures run under the lock and must not await.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, EditorSession>>,
}

impl SessionStore {
    pub async fn insert(&self, session: EditorSession) -> Uuid {
        let id = session.id;
        self.sessions.write().await.insert(id, session);
        id
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&EditorSession) -> R) -> Option<R> {
        self.sessions.read().await.get(&id).map(f)
    }

    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut EditorSession) -> R) -> Option<R> {
        self.sessions.write().await.get_mut(&id).map(|session| {
            session.last_active = Utc::now();
            f(session)
        })
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drops every session untouched since `cutoff`. Returns how many were dropped.
    pub async fn evict_idle_since(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active >= cutoff);
        before - sessions.len()
    }
}

/// How often the idle sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Evicts sessions abandoned without `DELETE /sessions/:id`. Runs for the life of the process.
pub async fn run_idle_sweep(store: Arc<SessionStore>, idle_timeout: Duration) {
    let idle = chrono::Duration::from_std(idle_timeout).unwrap_or_else(|_| chrono::Duration::weeks(52_000));
    tracing::info!(
        idle_timeout_secs = idle_timeout.as_secs(),
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Session idle sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let cutoff = Utc::now()
            .checked_sub_signed(idle)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let evicted = store.evict_idle_since(cutoff).await;
        if evicted > 0 {
            tracing::info!(evicted, "Session idle sweep: dropped abandoned sessions");
        } else {
            tracing::debug!("Session idle sweep: nothing to drop");
        }
    }
}
