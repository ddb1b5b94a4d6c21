//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{AppError, AppJson};
use crate::generation::builder::GenerationMode;
use crate::generation::generator::{generate_posts, GenerationOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Missing and empty are both rejected as invalid input.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub mode: GenerationMode,
}

/// POST /api/remix
///
/// Turns raw text into posts. Structured mode returns the split posts,
/// remix mode a single verbatim rewrite; both include the provider content blocks.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let text = request.text.unwrap_or_default();
    let outcome = generate_posts(&state.llm, &text, request.mode).await?;
    Ok(Json(outcome))
}
