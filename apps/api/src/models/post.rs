use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A post the user chose to keep. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SavedPost {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
