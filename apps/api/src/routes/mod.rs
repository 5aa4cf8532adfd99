pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::remote::handlers as remote;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates and stateless rendering
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route("/api/v1/preview", post(render::handle_preview))
        // Editor sessions
        .route("/api/v1/sessions", post(editor::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(editor::handle_get_session).delete(editor::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/step/next",
            post(editor::handle_step_next),
        )
        .route(
            "/api/v1/sessions/:id/step/previous",
            post(editor::handle_step_previous),
        )
        .route("/api/v1/sessions/:id/step", put(editor::handle_step_jump))
        .route("/api/v1/sessions/:id/actions", post(editor::handle_action))
        .route("/api/v1/sessions/:id/skills", post(editor::handle_add_skill))
        .route(
            "/api/v1/sessions/:id/skills/:index",
            delete(editor::handle_remove_skill),
        )
        .route(
            "/api/v1/sessions/:id/accent",
            put(editor::handle_set_accent).delete(editor::handle_reset_accent),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(editor::handle_set_template),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(editor::handle_session_preview),
        )
        .route("/api/v1/sessions/:id/enhance", post(editor::handle_enhance))
        .route("/api/v1/sessions/:id/save", post(editor::handle_save))
        // Backend pass-through
        .route("/api/v1/resumes", get(remote::handle_list_resumes))
        .route("/api/v1/analyze", post(remote::handle_analyze))
        .with_state(state)
}
