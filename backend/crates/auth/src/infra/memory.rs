//! In-process directory and session store
//!
//! Used when no database is configured, and by the test suite. Contents are
//! lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{SessionId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionStore, UserDirectory, UserField};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Users held in insertion order
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_field(&self, field: UserField, value: &str) -> AuthResult<Vec<User>> {
        match field {
            UserField::Email => {
                // Not an address, so nobody can own it
                let Ok(email) = Email::new(value) else {
                    return Ok(Vec::new());
                };
                let users = self.users.read().await;
                Ok(users.iter().filter(|u| u.email == email).cloned().collect())
            }
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.id == user_id).cloned())
    }

    async fn insert(&self, user: &User) -> AuthResult<()> {
        self.users.write().await.push(user.clone());
        Ok(())
    }
}

/// Sessions keyed by identifier
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a prepared session as is
    pub async fn insert(&self, session: Session) {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session);
    }

    /// Drop sessions created before `now - ttl`
    pub async fn purge_expired(&self, ttl: chrono::Duration) -> usize {
        let now = chrono::Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(Some(ttl), now));
        before - sessions.len()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: &UserId) -> AuthResult<SessionId> {
        let mut sessions = self.sessions.write().await;
        let mut session = Session::new(*user_id);
        while sessions.contains_key(&session.session_id) {
            session = Session::new(*user_id);
        }
        let session_id = session.session_id;
        sessions.insert(session_id, session);
        Ok(session_id)
    }

    async fn lookup(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn destroy(&self, session_id: &SessionId) -> AuthResult<bool> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn len(&self) -> AuthResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}
