//! Prompt Builder — turns raw user text into the system + user instruction pair.
//!
//! Pure: no I/O. Empty input is rejected before anything is built.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::prompts::{
    REMIX_PROMPT_TEMPLATE, REMIX_SYSTEM, STRUCTURED_PROMPT_TEMPLATE, STRUCTURED_SYSTEM,
};

pub const EMPTY_INPUT_MESSAGE: &str = "Input text is required";

/// Which output contract the model is asked to follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Exactly 5 numbered, sentinel-separated, length-capped posts.
    #[default]
    Structured,
    /// A single creative rewrite with no structural contract.
    Remix,
}

/// The complete instruction payload for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub system: String,
    pub user: String,
}

/// Builds the instruction for `mode` around the trimmed `raw_text`.
pub fn build_instruction(raw_text: &str, mode: GenerationMode) -> Result<Instruction, AppError> {
    let input_text = raw_text.trim();
    if input_text.is_empty() {
        return Err(AppError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
    }

    let (system, template) = match mode {
        GenerationMode::Structured => (STRUCTURED_SYSTEM, STRUCTURED_PROMPT_TEMPLATE),
        GenerationMode::Remix => (REMIX_SYSTEM, REMIX_PROMPT_TEMPLATE),
    };

    Ok(Instruction {
        system: system.to_string(),
        user: template.replace("{input_text}", input_text),
    })
}
