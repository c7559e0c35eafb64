//! PostgreSQL user repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::{debug, info};

use super::UserStore;
use crate::models::User;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist yet
    pub async fn ensure_schema(&self) -> DatabaseResult<()> {
        info!("Ensuring users table exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(50) NOT NULL UNIQUE,
                email VARCHAR(100) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        Ok(())
    }
}

impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        debug!("Finding user by ID: {}", id);

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn insert(&self, username: &str, email: &str, password_hash: &str) -> DatabaseResult<User> {
        info!("Creating new user: {}", username);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}
