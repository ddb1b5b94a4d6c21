pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::posts::handlers as posts;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/remix", post(generation::handle_generate))
        .route(
            "/api/posts",
            get(posts::handle_list_posts).post(posts::handle_create_post),
        )
        .route("/api/posts/:id", delete(posts::handle_delete_post))
        .route("/api/posts/:id/edits", post(posts::handle_edit_post))
        .with_state(state)
}
