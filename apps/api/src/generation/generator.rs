//! Post Generation — orchestrates one generation request.
//!
//! Flow: build_instruction → LLM call → split (structured mode only).
//! Splitting happens here and nowhere else.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::builder::{build_instruction, GenerationMode};
use crate::generation::prompts::POST_COUNT;
use crate::generation::splitter::{split_posts, PostCandidate};
use crate::llm_client::{ContentBlock, LlmClient};

/// Shown alongside an empty `posts` list so clients render an explicit empty state.
pub const NO_CONTENT_NOTICE: &str = "No content received from the API.";

/// Result of one generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub mode: GenerationMode,
    /// Provider content blocks, unmodified.
    pub content: Vec<ContentBlock>,
    pub posts: Vec<PostCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Runs Builder → Client → Splitter for `raw_text`.
///
/// Input is validated before the LLM is contacted. A response with no usable
/// text is not an error: it produces an empty `posts` list plus a notice.
pub async fn generate_posts(
    llm: &LlmClient,
    raw_text: &str,
    mode: GenerationMode,
) -> Result<GenerationOutcome, AppError> {
    let instruction = build_instruction(raw_text, mode)?;

    let response = llm.call(&instruction.user, &instruction.system).await?;
    let generated = response.text().unwrap_or_default();

    let posts = match mode {
        GenerationMode::Structured => {
            let posts = split_posts(generated);
            if !posts.is_empty() && posts.len() != POST_COUNT {
                warn!(
                    "Expected {} posts from structured generation, got {}",
                    POST_COUNT,
                    posts.len()
                );
            }
            posts
        }
        GenerationMode::Remix if generated.trim().is_empty() => Vec::new(),
        GenerationMode::Remix => vec![PostCandidate::new(generated.to_string(), 0)],
    };

    info!("Generated {} post(s) in {:?} mode", posts.len(), mode);

    let notice = posts.is_empty().then(|| NO_CONTENT_NOTICE.to_string());
    Ok(GenerationOutcome {
        mode,
        content: response.content,
        posts,
        notice,
    })
}
