use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::BearerAuth;
use crate::editor::enhance::plan_enhancement;
use crate::editor::session::{EditorSession, SessionSnapshot};
use crate::editor::wizard::WizardView;
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::remote::{EnhanceRequest, ResumeId};
use crate::render::{render, Variant, ViewTree};
use crate::resume::validation::validate_for_submit;
use crate::resume::{reduce, Action, FieldPath, FieldValue};
use crate::state::AppState;

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub title: Option<String>,
    /// Opens an existing résumé instead of starting empty.
    pub resume_id: Option<ResumeId>,
    pub template: Option<Variant>,
    pub accent_color: Option<String>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    auth: Option<BearerAuth>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let mut session = match req.resume_id {
        Some(resume_id) => {
            let BearerAuth(auth) = auth.ok_or(AppError::Unauthorized)?;
            let saved = state.resumes.load(&auth, &resume_id).await?;
            info!(resume_id = %resume_id, "loaded resume into new session");
            EditorSession::from_saved(saved)
        }
        None => EditorSession::new(req.title),
    };

    if let Some(variant) = req.template {
        session.variant = variant;
    }
    if let Some(color) = req.accent_color {
        session.theme.set(color);
    }

    let snapshot = session.snapshot();
    state.sessions.insert(session).await;
    info!(session_id = %snapshot.id, "editor session started");

    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .sessions
        .read(id, EditorSession::snapshot)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(session_not_found(id));
    }
    info!(session_id = %id, "editor session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/step/next
pub async fn handle_step_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.wizard.advance();
            WizardView::from(&s.wizard)
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// POST /api/v1/sessions/:id/step/previous
pub async fn handle_step_previous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.wizard.retreat();
            WizardView::from(&s.wizard)
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub index: i64,
}

/// PUT /api/v1/sessions/:id/step
pub async fn handle_step_jump(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JumpRequest>,
) -> Result<Json<WizardView>, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.wizard.jump_to(req.index);
            WizardView::from(&s.wizard)
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

async fn apply_action(state: &AppState, id: Uuid, action: Action) -> Result<SessionSnapshot, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.apply(action)?;
            Ok::<_, AppError>(s.snapshot())
        })
        .await
        .ok_or_else(|| session_not_found(id))?
}

/// POST /api/v1/sessions/:id/actions
pub async fn handle_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<Action>,
) -> Result<Json<SessionSnapshot>, AppError> {
    apply_action(&state, id, action).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub label: String,
}

/// POST /api/v1/sessions/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddSkillRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    apply_action(&state, id, Action::AddSkill { label: req.label })
        .await
        .map(Json)
}

/// DELETE /api/v1/sessions/:id/skills/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    apply_action(&state, id, Action::RemoveSkill { index })
        .await
        .map(Json)
}

#[derive(Debug, Deserialize)]
pub struct AccentRequest {
    pub color: String,
}

/// PUT /api/v1/sessions/:id/accent
pub async fn handle_set_accent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AccentRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.theme.set(req.color);
            s.snapshot()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// DELETE /api/v1/sessions/:id/accent
pub async fn handle_reset_accent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.theme.reset();
            s.snapshot()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: Variant,
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .sessions
        .update(id, |s| {
            s.variant = req.template;
            s.snapshot()
        })
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_session_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ViewTree>, AppError> {
    state
        .sessions
        .read(id, |s| render(&s.document, Some(s.theme.color()), s.variant))
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Deserialize)]
pub struct EnhanceFieldRequest {
    pub field: FieldPath,
}

#[derive(Debug, Serialize)]
pub struct EnhanceOutcome {
    pub field: FieldPath,
    /// False when the field changed while the request was in flight.
    pub applied: bool,
    pub enhanced_text: String,
    pub document: ResumeDocument,
}

/// POST /api/v1/sessions/:id/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    BearerAuth(auth): BearerAuth,
    Json(req): Json<EnhanceFieldRequest>,
) -> Result<Json<EnhanceOutcome>, AppError> {
    let field = req.field;

    let (ticket, plan) = state
        .sessions
        .update(id, |s| {
            let plan = plan_enhancement(&s.document, &field)?;
            Ok::<_, AppError>((s.tracker.begin(field), plan))
        })
        .await
        .ok_or_else(|| session_not_found(id))??;

    // No session lock is held while the backend works.
    let result = state
        .enhancer
        .enhance(
            &auth,
            EnhanceRequest {
                text: plan.text,
                prompt_override: plan.prompt_override,
            },
        )
        .await;

    let enhanced_text = match result {
        Ok(text) => text,
        Err(e) => {
            state
                .sessions
                .update(id, |s| s.tracker.abandon(&ticket))
                .await;
            return Err(e.into());
        }
    };

    let outcome = state
        .sessions
        .update(id, |s| {
            let applied = s.tracker.complete(&ticket);
            if applied {
                s.document = reduce(
                    &s.document,
                    Action::Set {
                        path: field,
                        value: FieldValue::Text(enhanced_text.clone()),
                    },
                )?;
            } else {
                warn!(session_id = %id, field = %field, "discarding stale enhancement");
            }
            Ok::<_, AppError>(EnhanceOutcome {
                field,
                applied,
                enhanced_text,
                document: s.document.clone(),
            })
        })
        .await
        .ok_or_else(|| session_not_found(id))??;

    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct SaveOutcome {
    pub resume_id: ResumeId,
    pub title: String,
    pub created: bool,
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    BearerAuth(auth): BearerAuth,
) -> Result<Json<SaveOutcome>, AppError> {
    let save_lock = state
        .sessions
        .read(id, |s| s.save_lock.clone())
        .await
        .ok_or_else(|| session_not_found(id))?;
    let _guard = save_lock.lock().await;

    // Read after acquiring the save lock so a queued save sees the id from the one before it.
    let (document, resume_id, title) = state
        .sessions
        .read(id, |s| (s.document.clone(), s.resume_id.clone(), s.save_title()))
        .await
        .ok_or_else(|| session_not_found(id))?;

    validate_for_submit(&document.personal_info).map_err(AppError::Validation)?;

    let created = resume_id.is_none();
    let saved = match &resume_id {
        Some(existing) => state.resumes.update(&auth, existing, &title, &document).await?,
        None => state.resumes.create(&auth, &title, &document).await?,
    };

    state
        .sessions
        .update(id, |s| s.resume_id = Some(saved.id.clone()))
        .await;

    info!(session_id = %id, resume_id = %saved.id, created, "resume saved");

    Ok(Json(SaveOutcome {
        resume_id: saved.id,
        title,
        created,
    }))
}
