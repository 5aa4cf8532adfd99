use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::ResumeDocument;
use crate::render::{catalogue, render_by_id, TemplateInfo, ViewTree, ACCENT_PRESETS, DEFAULT_ACCENT_COLOR};

#[derive(Debug, Serialize)]
pub struct TemplateCatalogue {
    pub templates: Vec<TemplateInfo>,
    pub default_template: &'static str,
    pub accent_presets: &'static [&'static str],
    pub default_accent_color: &'static str,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplateCatalogue> {
    Json(TemplateCatalogue {
        templates: catalogue(),
        default_template: crate::render::Variant::default().id(),
        accent_presets: ACCENT_PRESETS,
        default_accent_color: DEFAULT_ACCENT_COLOR,
    })
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub document: ResumeDocument,
    pub template: Option<String>,
    pub accent_color: Option<String>,
}

/// POST /api/v1/preview
/// Renders a document without a session. Never fails on content.
pub async fn handle_preview(Json(req): Json<PreviewRequest>) -> Json<ViewTree> {
    Json(render_by_id(
        &req.document,
        req.accent_color.as_deref(),
        req.template.as_deref().unwrap_or_default(),
    ))
}
