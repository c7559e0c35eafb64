//! In-memory user repository for tests and local development

use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::UserStore;
use crate::models::User;

#[derive(Debug, Default)]
struct MemoryUsers {
    users: Vec<User>,
    next_id: i64,
}

/// User repository backed by process memory
///
/// Enforces the same uniqueness rules as the `users` table.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    inner: Arc<Mutex<MemoryUsers>>,
}

impl MemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.lock().await.users.len()
    }

    /// Whether no users are stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Overwrite a user's stored hash
    pub async fn set_password_hash(&self, id: i64, password_hash: &str) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

impl UserStore for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, username: &str, email: &str, password_hash: &str) -> DatabaseResult<User> {
        let mut inner = self.inner.lock().await;

        if inner.users.iter().any(|u| u.username == username) {
            return Err(DatabaseError::UniqueViolation(
                "users_username_key".to_string(),
            ));
        }
        if inner.users.iter().any(|u| u.email == email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.users.push(user.clone());

        Ok(user)
    }
}
