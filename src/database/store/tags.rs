use serde_json::Value;
use sqlx::PgPool;

use crate::api::helpers::Payload;
use crate::database::id::generate_id;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Tag;

pub struct TagStore {
    pool: PgPool,
}

impl TagStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::main_pool().await? })
    }

    /// All tags owned by the user, name ascending.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Tag>, DatabaseError> {
        let tags =
            sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE user_id = $1 ORDER BY name ASC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(tags)
    }

    pub async fn find(&self, id: &str, user_id: &str) -> Result<Option<Tag>, DatabaseError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tag)
    }

    /// Count of tags owned by the user whose ids fall in the given set.
    /// Used by the tag reference validator: a count lower than the number of
    /// submitted ids means some tag does not exist or is not owned.
    pub async fn count_owned_in(
        &self,
        ids: &[String],
        user_id: &str,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tags WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Tag, DatabaseError> {
        let id = generate_id();
        let name = payload.get("name").and_then(Value::as_str).unwrap_or_default();
        let user_id = payload.get("userId").and_then(Value::as_str).unwrap_or_default();

        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, name, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&id)
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(tag)
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        payload: &Payload,
    ) -> Result<Option<Tag>, DatabaseError> {
        let name = payload.get("name").and_then(Value::as_str);

        let tag = sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags
               SET name = COALESCE($3, name),
                   updated_at = now()
             WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tag)
    }

    /// Delete the tag, then remove its id from the tags array of every note
    /// that carried it. The notes themselves are preserved. Returns false
    /// when no owned tag matched.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE notes SET tags = array_remove(tags, $2), updated_at = now()
              WHERE user_id = $1 AND $2 = ANY(tags)",
        )
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(true)
    }
}
