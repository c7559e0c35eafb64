//! In-memory session store
//!
//! Sessions live in a single lock-guarded map owned by the store. Every
//! operation holds the lock for its whole read-modify-write, so create,
//! resolve and revoke on the same token are linearizable. Expired records are
//! evicted lazily by the first `resolve` that sees them; there is no sweeper.
//!
//! Sessions do not survive a restart.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use rand::{RngCore, rngs::OsRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::Session;

/// Random bytes per session token
const TOKEN_BYTES: usize = 32;

/// Default session lifetime (7 days)
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Store of live sessions keyed by opaque bearer token
///
/// Cloning yields another handle to the same sessions.
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL_SECONDS)
    }
}

impl SessionStore {
    /// Create an empty store whose sessions live for `ttl_seconds`
    pub fn new(ttl_seconds: u64) -> Self {
        let ttl_seconds = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        Self {
            ttl: Duration::try_seconds(ttl_seconds).unwrap_or(Duration::MAX),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Session lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a new session for a user and return its token
    pub async fn create(&self, user_id: i64) -> String {
        let token = generate_token();
        let session = Session::new(user_id, Utc::now(), self.ttl);

        let mut sessions = self.sessions.lock().await;
        sessions.insert(token.clone(), session);
        info!("Created session for user {}", user_id);

        token
    }

    /// Resolve a token to its user ID
    ///
    /// Unknown and expired tokens both yield `None`; an expired record is
    /// removed.
    pub async fn resolve(&self, token: &str) -> Option<i64> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get(token)?;

        if session.is_valid_at(Utc::now()) {
            return Some(session.user_id);
        }

        let user_id = session.user_id;
        sessions.remove(token);
        debug!("Evicted expired session for user {}", user_id);
        None
    }

    /// Revoke a session; revoking an unknown token is a no-op
    pub async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.remove(token) {
            info!("Revoked session for user {}", session.user_id);
        }
    }

    /// Number of stored sessions, including expired ones not yet evicted
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether the store holds no sessions
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
