//! Session Auth Strategy
//!
//! A cookie carries an opaque session id; the store maps it to a user id.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use kernel::id::{SessionId, UserId};
use platform::cookie::extract_cookie;

use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserDirectory};
use crate::domain::services::PathMatcher;
use crate::error::AuthResult;

pub struct SessionAuth<D, S> {
    paths: PathMatcher,
    directory: Arc<D>,
    store: Arc<S>,
    cookie_name: String,
    ttl: Option<chrono::Duration>,
}

impl<D, S> SessionAuth<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    /// `session_duration` of `None` keeps sessions until logout
    pub fn new(
        paths: PathMatcher,
        directory: Arc<D>,
        store: Arc<S>,
        cookie_name: impl Into<String>,
        session_duration: Option<Duration>,
    ) -> Self {
        // Lifetimes beyond chrono's range never expire in practice
        let ttl = session_duration.and_then(|d| chrono::Duration::from_std(d).ok());
        Self {
            paths,
            directory,
            store,
            cookie_name: cookie_name.into(),
            ttl,
        }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        self.paths.requires_auth(path)
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Session cookie value, if the request has one
    pub fn extract_carrier(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.cookie_name)
    }

    pub async fn create_session(&self, user_id: &UserId) -> AuthResult<SessionId> {
        let session_id = self.store.create(user_id).await?;
        tracing::debug!(user_id = %user_id, "Session created");
        Ok(session_id)
    }

    /// User id bound to a raw session token
    ///
    /// Tokens that do not parse and sessions past their lifetime resolve to
    /// `None`. An expired session is destroyed on the way out.
    pub async fn user_id_for_session_id(&self, token: &str) -> AuthResult<Option<UserId>> {
        let Ok(session_id) = token.parse::<SessionId>() else {
            return Ok(None);
        };
        let Some(session) = self.store.lookup(&session_id).await? else {
            return Ok(None);
        };

        if session.is_expired(self.ttl) {
            self.store.destroy(&session_id).await?;
            tracing::debug!(user_id = %session.user_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(session.user_id))
    }

    async fn resolve(&self, headers: &HeaderMap) -> AuthResult<Option<User>> {
        let Some(token) = self.extract_carrier(headers) else {
            return Ok(None);
        };
        let Some(user_id) = self.user_id_for_session_id(&token).await? else {
            return Ok(None);
        };
        self.directory.find_by_id(&user_id).await
    }

    /// User behind the session cookie, or `None`
    pub async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        match self.resolve(headers).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed");
                None
            }
        }
    }

    /// Remove the session named by the request cookie
    ///
    /// `Ok(false)` when there is no cookie or no such session.
    pub async fn destroy_session(&self, headers: &HeaderMap) -> AuthResult<bool> {
        let Some(token) = self.extract_carrier(headers) else {
            return Ok(false);
        };
        let Ok(session_id) = token.parse::<SessionId>() else {
            return Ok(false);
        };
        let destroyed = self.store.destroy(&session_id).await?;
        if destroyed {
            tracing::debug!("Session destroyed");
        }
        Ok(destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::session::Session;
    use crate::infra::argon2::Argon2PasswordVerifier;
    use crate::infra::memory::{InMemorySessionStore, InMemoryUserDirectory};
    use crate::test_support::{headers_with, seed_user};
    use axum::http::header;
    use chrono::Utc;

    type Strategy = SessionAuth<InMemoryUserDirectory, InMemorySessionStore>;

    async fn strategy(ttl: Option<Duration>) -> (Strategy, User) {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let bob = seed_user(
            directory.as_ref(),
            &Argon2PasswordVerifier::default(),
            "bob@x.com",
            "hunter2",
        )
        .await;
        let auth = SessionAuth::new(
            PathMatcher::new(["/api/v1/status/"]),
            directory,
            Arc::new(InMemorySessionStore::new()),
            "_my_session_id",
            ttl,
        );
        (auth, bob)
    }

    fn cookie(value: &str) -> HeaderMap {
        headers_with(header::COOKIE, &format!("_my_session_id={value}"))
    }

    #[tokio::test]
    async fn test_cookie_resolves_user() {
        let (auth, bob) = strategy(None).await;
        let session_id = auth.create_session(&bob.id).await.unwrap();

        let headers = cookie(&session_id.to_string());
        assert_eq!(auth.extract_carrier(&headers), Some(session_id.to_string()));

        let user = auth.current_user(&headers).await.unwrap();
        assert_eq!(user.id, bob.id);
    }

    #[tokio::test]
    async fn test_unknown_or_missing_cookie() {
        let (auth, _) = strategy(None).await;

        assert!(auth.current_user(&HeaderMap::new()).await.is_none());
        assert!(auth.current_user(&cookie("not-a-uuid")).await.is_none());
        assert!(
            auth.current_user(&cookie(&SessionId::new().to_string()))
                .await
                .is_none()
        );

        let other = headers_with(header::COOKIE, "session=abc");
        assert!(auth.extract_carrier(&other).is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let (auth, bob) = strategy(None).await;
        let first = auth.create_session(&bob.id).await.unwrap();
        let second = auth.create_session(&bob.id).await.unwrap();
        assert_ne!(first, second);

        assert!(auth.destroy_session(&cookie(&first.to_string())).await.unwrap());
        assert!(auth.current_user(&cookie(&first.to_string())).await.is_none());
        assert!(auth.current_user(&cookie(&second.to_string())).await.is_some());
    }

    #[tokio::test]
    async fn test_destroy_without_session() {
        let (auth, _) = strategy(None).await;
        assert!(!auth.destroy_session(&HeaderMap::new()).await.unwrap());
        assert!(!auth.destroy_session(&cookie("garbage")).await.unwrap());
        assert!(
            !auth
                .destroy_session(&cookie(&SessionId::new().to_string()))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let (auth, bob) = strategy(Some(Duration::from_secs(60))).await;

        let mut stale = Session::new(bob.id);
        stale.created_at = Utc::now() - chrono::Duration::seconds(120);
        let session_id = stale.session_id;
        auth.store().insert(stale).await;

        let headers = cookie(&session_id.to_string());
        assert!(auth.current_user(&headers).await.is_none());
        assert!(auth.store().lookup(&session_id).await.unwrap().is_none());

        let fresh = auth.create_session(&bob.id).await.unwrap();
        assert!(auth.current_user(&cookie(&fresh.to_string())).await.is_some());
    }

    #[tokio::test]
    async fn test_no_duration_never_expires() {
        let (auth, bob) = strategy(None).await;

        let mut old = Session::new(bob.id);
        old.created_at = Utc::now() - chrono::Duration::days(365);
        let session_id = old.session_id;
        auth.store().insert(old).await;

        assert!(auth.current_user(&cookie(&session_id.to_string())).await.is_some());
    }

    #[tokio::test]
    async fn test_huge_duration_keeps_session_alive() {
        let (auth, bob) = strategy(Some(Duration::from_secs(1_000_000_000_000_000))).await;
        let session_id = auth.create_session(&bob.id).await.unwrap();

        let user = auth.current_user(&cookie(&session_id.to_string())).await;
        assert_eq!(user.map(|u| u.id), Some(bob.id));
    }
}
