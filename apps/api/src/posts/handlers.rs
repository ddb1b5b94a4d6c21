use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::models::post::SavedPost;
use crate::posts::store::{apply_edit, EditMode};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SavePostRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EditPostRequest {
    pub content: String,
    #[serde(default)]
    pub mode: EditMode,
}

fn require_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("Post content is required".to_string()));
    }
    Ok(())
}

/// GET /api/posts
pub async fn handle_list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedPost>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// POST /api/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    AppJson(req): AppJson<SavePostRequest>,
) -> Result<(StatusCode, Json<SavedPost>), AppError> {
    require_content(&req.content)?;
    let post = state.store.create(&req.content).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// DELETE /api/posts/:id
///
/// Always 204: deleting a post that does not exist is a no-op.
pub async fn handle_delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(id).await? {
        info!("Delete of post {id} matched nothing");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/:id/edits
///
/// `append` (default) saves the edit as a new post; `in_place` rewrites `id`.
pub async fn handle_edit_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(req): AppJson<EditPostRequest>,
) -> Result<(StatusCode, Json<SavedPost>), AppError> {
    require_content(&req.content)?;
    let outcome = apply_edit(state.store.as_ref(), id, &req.content, req.mode).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.post)))
}
