use serde_json::Value;
use sqlx::PgPool;

use crate::api::helpers::Payload;
use crate::database::id::generate_id;
use crate::database::manager::{is_unique_violation, DatabaseError, DatabaseManager};
use crate::database::models::Folder;

pub struct FolderStore {
    pool: PgPool,
}

impl FolderStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::main_pool().await? })
    }

    /// All folders owned by the user, name ascending.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Folder>, DatabaseError> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE user_id = $1 ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(folders)
    }

    pub async fn find(&self, id: &str, user_id: &str) -> Result<Option<Folder>, DatabaseError> {
        let folder =
            sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(folder)
    }

    /// Count of folders with this id owned by the user (0 or 1). Used by the
    /// folder reference validator.
    pub async fn count_owned(&self, id: &str, user_id: &str) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM folders WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn create(&self, payload: &Payload) -> Result<Folder, DatabaseError> {
        let id = generate_id();
        let name = payload.get("name").and_then(Value::as_str).unwrap_or_default();
        let user_id = payload.get("userId").and_then(Value::as_str).unwrap_or_default();
        let parent = payload.get("parent").and_then(Value::as_str);

        let folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, user_id, parent) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&id)
        .bind(name)
        .bind(user_id)
        .bind(parent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::UniqueViolation(format!(
                    "Folder `{}` already exists (name must be unique).",
                    name
                ))
            } else {
                DatabaseError::Sqlx(e)
            }
        })?;
        Ok(folder)
    }

    /// Partial update scoped to caller ownership. Fields absent from the
    /// payload keep their stored values; returns None when no owned folder
    /// matches the id.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        payload: &Payload,
    ) -> Result<Option<Folder>, DatabaseError> {
        let name = payload.get("name").and_then(Value::as_str);
        let parent = payload.get("parent").and_then(Value::as_str);

        let folder = sqlx::query_as::<_, Folder>(
            r#"
            UPDATE folders
               SET name = COALESCE($3, name),
                   parent = COALESCE($4, parent),
                   updated_at = now()
             WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(parent)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::UniqueViolation(format!(
                    "Folder `{}` already exists (name must be unique).",
                    name.unwrap_or_default()
                ))
            } else {
                DatabaseError::Sqlx(e)
            }
        })?;
        Ok(folder)
    }

    /// Delete the folder, then clear the folder reference on any notes that
    /// pointed to it. The notes themselves are preserved. Returns false when
    /// no owned folder matched.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE notes SET folder_id = NULL, updated_at = now()
              WHERE user_id = $1 AND folder_id = $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(true)
    }
}
