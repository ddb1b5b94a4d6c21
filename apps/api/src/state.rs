use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::posts::store::PostStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Saved-post backend, chosen at startup from `DATABASE_URL`.
    pub store: Arc<dyn PostStore>,
}
