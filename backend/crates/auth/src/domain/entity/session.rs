//! Session Entity
//!
//! A server-side session: an opaque identifier bound to one user.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

/// Authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Random UUID v4, sent to the client as the cookie value
    pub session_id: SessionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for `user_id` with a fresh identifier
    pub fn new(user_id: UserId) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            created_at: Utc::now(),
        }
    }

    /// Whether the session outlived `ttl` as of `now`
    ///
    /// `None` means sessions never expire, as does a deadline past the
    /// end of the representable calendar.
    pub fn is_expired_at(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        ttl.and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .is_some_and(|deadline| deadline < now)
    }

    pub fn is_expired(&self, ttl: Option<Duration>) -> bool {
        self.is_expired_at(ttl, Utc::now())
    }
}
