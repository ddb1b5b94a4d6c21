//! Response Splitter — normalizes structured-mode output into discrete posts.
//!
//! Count and length are never enforced here; `over_limit` only reports.

use serde::{Deserialize, Serialize};

use crate::generation::prompts::{MAX_POST_CHARS, SENTINEL};

/// One post extracted from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCandidate {
    pub text: String,
    /// Position of the segment in the raw sentinel split, before empties are dropped.
    pub source_index: usize,
    pub char_count: usize,
    pub over_limit: bool,
}

impl PostCandidate {
    pub fn new(text: String, source_index: usize) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            source_index,
            char_count,
            over_limit: char_count > MAX_POST_CHARS,
        }
    }
}

/// Splits on every sentinel occurrence, trims, strips one ordinal prefix and
/// drops segments left empty. Text without a sentinel yields one segment.
///
/// The sentinel is not required to sit on its own line because the model also
/// emits it inline; a literal `|||` inside a post's prose therefore splits that post.
pub fn split_posts(raw: &str) -> Vec<PostCandidate> {
    raw.split(SENTINEL)
        .enumerate()
        .filter_map(|(index, segment)| {
            let text = strip_ordinal_prefix(segment.trim());
            (!text.is_empty()).then(|| PostCandidate::new(text.to_string(), index))
        })
        .collect()
}

/// Removes a leading `<digits>.` and any whitespace after it.
fn strip_ordinal_prefix(segment: &str) -> &str {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return segment;
    }
    match segment[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => segment,
    }
}
