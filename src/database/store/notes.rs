use serde_json::Value;
use sqlx::PgPool;

use crate::api::helpers::Payload;
use crate::database::id::generate_id;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Note;

/// Optional narrowing filters for the note listing. `folder_id` and `tag_id`
/// are exact matches; `search_term` is a case-insensitive substring match on
/// the title.
#[derive(Debug, Default)]
pub struct NoteFilters {
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
    pub search_term: Option<String>,
}

pub struct NoteStore {
    pool: PgPool,
}

impl NoteStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::main_pool().await? })
    }

    /// Notes owned by the user matching the filters, most recently updated
    /// first.
    pub async fn list(
        &self,
        user_id: &str,
        filters: &NoteFilters,
    ) -> Result<Vec<Note>, DatabaseError> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes
             WHERE user_id = $1
               AND ($2::text IS NULL OR folder_id = $2)
               AND ($3::text IS NULL OR $3 = ANY(tags))
               AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%')
             ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .bind(filters.folder_id.as_deref())
        .bind(filters.tag_id.as_deref())
        .bind(filters.search_term.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn find(&self, id: &str, user_id: &str) -> Result<Option<Note>, DatabaseError> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Note, DatabaseError> {
        let id = generate_id();
        let title = payload.get("title").and_then(Value::as_str).unwrap_or_default();
        let document = payload.get("document").cloned().unwrap_or(Value::Null);
        let user_id = payload.get("userId").and_then(Value::as_str).unwrap_or_default();
        let folder_id = payload.get("folderId").and_then(Value::as_str);
        let tags = string_array(payload.get("tags")).unwrap_or_default();

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, title, document, user_id, folder_id, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(title)
        .bind(document)
        .bind(user_id)
        .bind(folder_id)
        .bind(&tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    /// Partial update scoped to caller ownership; absent fields keep their
    /// stored values.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        payload: &Payload,
    ) -> Result<Option<Note>, DatabaseError> {
        let title = payload.get("title").and_then(Value::as_str);
        let document = payload.get("document").cloned();
        let folder_id = payload.get("folderId").and_then(Value::as_str);
        let tags = string_array(payload.get("tags"));

        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
               SET title = COALESCE($3, title),
                   document = COALESCE($4, document),
                   folder_id = COALESCE($5, folder_id),
                   tags = COALESCE($6, tags),
                   updated_at = now()
             WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(document)
        .bind(folder_id)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    value.and_then(Value::as_array).map(|items| {
        items.iter().filter_map(Value::as_str).map(str::to_string).collect()
    })
}
