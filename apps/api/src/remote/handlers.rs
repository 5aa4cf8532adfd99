use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::auth::BearerAuth;
use crate::errors::AppError;
use crate::remote::{AnalysisReport, AnalysisUpload, SavedResume};
use crate::state::AppState;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    BearerAuth(auth): BearerAuth,
) -> Result<Json<Vec<SavedResume>>, AppError> {
    Ok(Json(state.resumes.list(&auth).await?))
}

fn bad_multipart(err: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("Malformed upload: {err}"))
}

/// POST /api/v1/analyze
/// Multipart fields: `resume_file`, `job_role`, optional `job_description`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    BearerAuth(auth): BearerAuth,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut file: Option<(String, Option<String>, Bytes)> = None;
    let mut job_role: Option<String> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume_file") => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some((file_name, content_type, bytes));
            }
            Some("job_role") => job_role = Some(field.text().await.map_err(bad_multipart)?),
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(bad_multipart)?)
            }
            _ => {}
        }
    }

    let job_role = job_role.filter(|r| !r.trim().is_empty());
    let (Some((file_name, content_type, bytes)), Some(job_role)) = (file, job_role) else {
        return Err(AppError::Validation("Missing file or job role.".to_string()));
    };

    let report = state
        .analyzer
        .analyze(
            &auth,
            AnalysisUpload {
                file_name,
                content_type,
                bytes,
                job_role,
                job_description,
            },
        )
        .await?;

    Ok(Json(report))
}
