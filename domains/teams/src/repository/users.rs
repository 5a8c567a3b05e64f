//! User repository, the identity directory
//!
//! Read-only from the engine's point of view: user records are created by
//! the account service, which is outside this crate.

use crate::domain::entities::User;
use teamline_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, user_code, avatar_url, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by their unique join code
    pub async fn get_by_code(&self, user_code: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, user_code, avatar_url, created_at
            FROM users
            WHERE user_code = $1
            "#,
        )
        .bind(user_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Case-insensitive substring search over name and join code,
    /// excluding one user (the caller)
    pub async fn search(&self, query: &str, excluding_user_id: Uuid) -> Result<Vec<User>> {
        let pattern = format!("%{}%", query);
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, user_code, avatar_url, created_at
            FROM users
            WHERE (name ILIKE $1 OR user_code ILIKE $1)
              AND id <> $2
            ORDER BY name ASC
            "#,
        )
        .bind(pattern)
        .bind(excluding_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
