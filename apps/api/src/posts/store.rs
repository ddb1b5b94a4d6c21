//! Saved-post persistence — pluggable, trait-based store.
//!
//! `PgPostStore` is used when `DATABASE_URL` is set, `InMemoryPostStore` otherwise
//! (and in tests). `AppState` holds an `Arc<dyn PostStore>`.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::post::SavedPost;

/// The saved-post store. Each operation is atomic on its own; there is no
/// cross-operation transaction.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Stores `content` exactly as given and returns the new record.
    async fn create(&self, content: &str) -> Result<SavedPost, AppError>;

    /// All saved posts, newest first (ties broken by id, highest first).
    async fn list(&self) -> Result<Vec<SavedPost>, AppError>;

    /// Removes `id`. Returns whether a record was removed; a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Replaces the content of `id` in place. `None` if `id` does not exist.
    async fn update(&self, id: i64, content: &str) -> Result<Option<SavedPost>, AppError>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, content: &str) -> Result<SavedPost, AppError> {
        let post = sqlx::query_as::<_, SavedPost>(
            "INSERT INTO saved_posts (content) VALUES ($1) RETURNING id, content, created_at",
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved post {}", post.id);
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<SavedPost>, AppError> {
        Ok(sqlx::query_as::<_, SavedPost>(
            "SELECT id, content, created_at FROM saved_posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM saved_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, id: i64, content: &str) -> Result<Option<SavedPost>, AppError> {
        Ok(sqlx::query_as::<_, SavedPost>(
            "UPDATE saved_posts SET content = $1 WHERE id = $2 RETURNING id, content, created_at",
        )
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryInner {
    last_id: i64,
    posts: Vec<SavedPost>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryPostStore {
    inner: RwLock<MemoryInner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, content: &str) -> Result<SavedPost, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let post = SavedPost {
            id: inner.last_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        inner.posts.push(post.clone());
        Ok(post)
    }

    async fn list(&self) -> Result<Vec<SavedPost>, AppError> {
        let mut posts = self.inner.read().await.posts.clone();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(posts)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.posts.len();
        inner.posts.retain(|p| p.id != id);
        Ok(inner.posts.len() != before)
    }

    async fn update(&self, id: i64, content: &str) -> Result<Option<SavedPost>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.content = content.to_string();
            post.clone()
        }))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Editing
// ────────────────────────────────────────────────────────────────────────────

/// How an edit to a saved post is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Save the edited content as a new post; the original stays as it was.
    #[default]
    Append,
    /// Replace the original post's content.
    InPlace,
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub post: SavedPost,
    /// True when the edit produced a new record.
    pub created: bool,
}

pub async fn apply_edit(
    store: &dyn PostStore,
    id: i64,
    content: &str,
    mode: EditMode,
) -> Result<EditOutcome, AppError> {
    match mode {
        EditMode::Append => {
            let post = store.create(content).await?;
            info!("Edit of post {id} saved as new post {}", post.id);
            Ok(EditOutcome {
                post,
                created: true,
            })
        }
        EditMode::InPlace => {
            let post = store
                .update(id, content)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;
            Ok(EditOutcome {
                post,
                created: false,
            })
        }
    }
}
