//! Session model and related functionality

use chrono::{DateTime, Duration, Utc};

/// Server-side record behind a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session at `now` that lives for `ttl`
    pub fn new(user_id: i64, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            created_at: now,
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// A session is valid strictly before its expiry
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let session = Session::new(1, now, Duration::seconds(60));

        assert!(session.is_valid_at(now));
        assert!(session.is_valid_at(now + Duration::seconds(59)));
        assert!(!session.is_valid_at(session.expires_at));
        assert!(!session.is_valid_at(now + Duration::seconds(61)));
    }
}
