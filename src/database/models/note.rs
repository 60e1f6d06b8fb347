use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A note owned by one user. `folder_id` is a weak reference (cleared when
/// the folder is deleted); `tags` holds ids of tags owned by the same user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Rich-text document tree, stored verbatim as JSONB.
    pub document: Value,
    pub user_id: String,
    pub folder_id: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
