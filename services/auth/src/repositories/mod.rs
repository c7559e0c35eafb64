//! User data access
//!
//! The credential verifier and the HTTP layer only reach user records through
//! [`UserStore`], so the backing storage can be swapped without touching them.

use common::error::DatabaseResult;
use std::future::Future;

use crate::models::User;

pub mod memory;
pub mod user;

pub use memory::MemoryUserRepository;
pub use user::UserRepository;

/// Read/write access to user credential records
pub trait UserStore: Clone + Send + Sync + 'static {
    /// Find a user by exact username
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = DatabaseResult<Option<User>>> + Send;

    /// Find a user by ID
    fn find_by_id(&self, id: i64) -> impl Future<Output = DatabaseResult<Option<User>>> + Send;

    /// Insert a new user
    ///
    /// A username or email collision must be reported as
    /// [`DatabaseError::UniqueViolation`](common::error::DatabaseError::UniqueViolation).
    fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> impl Future<Output = DatabaseResult<User>> + Send;
}
