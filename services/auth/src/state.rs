//! Application state shared across handlers

use crate::{
    credentials::CredentialVerifier, repositories::UserRepository, session::SessionStore,
};

/// Application state shared across handlers
///
/// Built once in `main`; every handler sees clones of the same session store
/// and verifier.
#[derive(Clone)]
pub struct AppState<U = UserRepository> {
    pub user_store: U,
    pub credentials: CredentialVerifier,
    pub sessions: SessionStore,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
}
