//! Service configuration loaded from the environment

use anyhow::Result;
use std::env;

use crate::session::DEFAULT_SESSION_TTL_SECONDS;

/// Argon2id cost parameters used for new password hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Number of passes over memory
    pub time_cost: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: 19_456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl PasswordConfig {
    /// Create a new PasswordConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PASSWORD_MEMORY_COST_KIB`: Argon2 memory cost (default: 19456)
    /// - `PASSWORD_TIME_COST`: Argon2 iterations (default: 2)
    /// - `PASSWORD_PARALLELISM`: Argon2 lanes (default: 1)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(PasswordConfig {
            memory_cost_kib: parse_var("PASSWORD_MEMORY_COST_KIB", defaults.memory_cost_kib)?,
            time_cost: parse_var("PASSWORD_TIME_COST", defaults.time_cost)?,
            parallelism: parse_var("PASSWORD_PARALLELISM", defaults.parallelism)?,
        })
    }
}

/// Authentication service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Session lifetime in seconds (default: 7 days)
    pub session_ttl_seconds: u64,
    /// Mark the session cookie `Secure` (set when served over TLS)
    pub cookie_secure: bool,
    /// Password hashing cost
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_BIND_ADDRESS`: Listen address (default: "0.0.0.0:3000")
    /// - `SESSION_TTL_SECONDS`: Session lifetime (default: 604800)
    /// - `COOKIE_SECURE`: "true" or "false" (default: false)
    /// - plus the variables read by [`PasswordConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let bind_address =
            env::var("AUTH_BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_ttl_seconds = parse_var("SESSION_TTL_SECONDS", DEFAULT_SESSION_TTL_SECONDS)?;
        if session_ttl_seconds == 0 {
            anyhow::bail!("SESSION_TTL_SECONDS must be greater than zero");
        }

        let cookie_secure = parse_var("COOKIE_SECURE", false)?;

        Ok(AuthConfig {
            bind_address,
            session_ttl_seconds,
            cookie_secure,
            password: PasswordConfig::from_env()?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}
