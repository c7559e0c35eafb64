//! Password hashing and credential verification
//!
//! Passwords are hashed with Argon2id into PHC strings that carry their own
//! algorithm, cost parameters and salt, so verification always uses the
//! parameters a hash was created with. Digest comparison is constant time.
//!
//! Hashing is deliberately slow. The async entry points run it on tokio's
//! blocking pool so a login never stalls other requests.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    config::PasswordConfig,
    error::{AuthError, AuthResult},
    models::User,
    repositories::UserStore,
};

struct VerifierInner {
    argon2: Argon2<'static>,
    /// Hash of a random plaintext checked when the username is unknown
    dummy_hash: String,
}

/// Hashes passwords and authenticates users against a [`UserStore`]
#[derive(Clone)]
pub struct CredentialVerifier {
    inner: Arc<VerifierInner>,
}

impl CredentialVerifier {
    /// Build a verifier for the given cost parameters
    ///
    /// The dummy hash used to equalise timing for unknown usernames is
    /// generated here, once per process, at the same cost as real hashes.
    pub fn new(config: PasswordConfig) -> AuthResult<Self> {
        let params = Params::new(
            config.memory_cost_kib,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::Hashing(format!("invalid Argon2 parameters: {}", e)))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        let dummy_hash = hash_with(&argon2, &URL_SAFE_NO_PAD.encode(seed))?;

        info!(
            "Credential verifier ready (m={} KiB, t={}, p={})",
            config.memory_cost_kib, config.time_cost, config.parallelism
        );

        Ok(Self {
            inner: Arc::new(VerifierInner { argon2, dummy_hash }),
        })
    }

    /// Hash a plain text password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        hash_with(&self.inner.argon2, password)
    }

    /// Verify a password against a stored hash
    ///
    /// A mismatch is `Ok(false)`. A hash that cannot be parsed or verified is a
    /// [`AuthError::DataIntegrity`] error.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> AuthResult<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AuthError::DataIntegrity(e.to_string()))?;
        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(AuthError::DataIntegrity(
                "password hash has no salt or digest".to_string(),
            ));
        }

        match self.inner.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::DataIntegrity(e.to_string())),
        }
    }

    /// Authenticate a user by username and password
    ///
    /// Returns `None` both for unknown usernames and wrong passwords. Unknown
    /// usernames still pay for one full verification against the dummy hash.
    pub async fn authenticate<S: UserStore>(
        &self,
        store: &S,
        username: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        let user = store.find_by_username(username).await?;
        let password = password.to_string();

        let Some(user) = user else {
            self.offload(move |verifier| {
                verifier.verify_password(&password, &verifier.inner.dummy_hash)
            })
            .await?;
            debug!("Authentication failed for username: {}", username);
            return Ok(None);
        };

        let stored_hash = user.password_hash.clone();
        let matched = self
            .offload(move |verifier| verifier.verify_password(&password, &stored_hash))
            .await
            .inspect_err(|e| {
                if matches!(e, AuthError::DataIntegrity(_)) {
                    warn!("Unreadable password hash for user {}", user.id);
                }
            })?;

        if matched {
            info!("User {} authenticated", user.id);
            Ok(Some(user))
        } else {
            debug!("Authentication failed for username: {}", username);
            Ok(None)
        }
    }

    /// Hash the password and store a new user
    ///
    /// A username or email that is already taken yields
    /// [`AuthError::DuplicateUser`].
    pub async fn register<S: UserStore>(
        &self,
        store: &S,
        username: &str,
        email: &str,
        password: &str,
    ) -> AuthResult<User> {
        let password = password.to_string();
        let password_hash = self
            .offload(move |verifier| verifier.hash_password(&password))
            .await?;

        match store.insert(username, email, &password_hash).await {
            Ok(user) => {
                info!("Registered user {} ({})", user.id, user.username);
                Ok(user)
            }
            Err(e) if e.is_unique_violation() => {
                info!("Registration rejected, username or email taken: {}", username);
                Err(AuthError::DuplicateUser)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run CPU-heavy work on the blocking pool
    async fn offload<T, F>(&self, task: F) -> AuthResult<T>
    where
        F: FnOnce(&CredentialVerifier) -> AuthResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let verifier = self.clone();
        tokio::task::spawn_blocking(move || task(&verifier))
            .await
            .map_err(|e| AuthError::Internal(format!("password task failed: {}", e)))?
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}
