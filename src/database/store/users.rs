use sqlx::PgPool;

use crate::database::id::generate_id;
use crate::database::manager::{is_unique_violation, DatabaseError, DatabaseManager};
use crate::database::models::User;

pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self { pool: DatabaseManager::main_pool().await? })
    }

    /// Insert a new user. The caller is responsible for validation and for
    /// hashing the password; names arrive already trimmed.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DatabaseError> {
        let id = generate_id();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::UniqueViolation("The email already exists".to_string())
            } else {
                DatabaseError::Sqlx(e)
            }
        })?;
        Ok(user)
    }

    /// Credential lookup for login; unscoped by design (there is no caller
    /// identity yet at this point).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
