//! Strategy selection
//!
//! The gateway runs exactly one strategy, chosen from configuration at
//! startup. All strategies answer the same questions: does this path need
//! authentication, what carries the credential, and who is the caller.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::application::basic_auth::BasicAuth;
use crate::application::config::{AuthConfig, AuthType};
use crate::application::session_auth::SessionAuth;
use crate::domain::entity::user::User;
use crate::domain::repository::{PasswordVerifier, SessionStore, UserDirectory};
use crate::domain::services::PathMatcher;

/// Strategy that never authenticates anyone
#[derive(Debug, Clone, Default)]
pub struct NullAuth {
    paths: PathMatcher,
}

impl NullAuth {
    pub fn new(paths: PathMatcher) -> Self {
        Self { paths }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        self.paths.requires_auth(path)
    }
}

/// The active authentication strategy
pub enum Authenticator<D, S> {
    Null(NullAuth),
    Basic(BasicAuth<D>),
    Session(SessionAuth<D, S>),
}

impl<D, S> Authenticator<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    /// Build the strategy named by `config.auth_type`
    ///
    /// `store` is only consulted by the session strategies.
    pub fn from_config(
        config: &AuthConfig,
        directory: Arc<D>,
        store: Arc<S>,
        verifier: Arc<dyn PasswordVerifier>,
    ) -> Self {
        let paths = PathMatcher::new(config.excluded_paths.iter().cloned());
        match config.auth_type {
            AuthType::None => Authenticator::Null(NullAuth::new(paths)),
            AuthType::Basic => Authenticator::Basic(BasicAuth::new(paths, directory, verifier)),
            AuthType::Session | AuthType::SessionDb => Authenticator::Session(SessionAuth::new(
                paths,
                directory,
                store,
                config.session_cookie_name.clone(),
                config.session_duration,
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Authenticator::Null(_) => "none",
            Authenticator::Basic(_) => "basic",
            Authenticator::Session(_) => "session",
        }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        match self {
            Authenticator::Null(auth) => auth.requires_auth(path),
            Authenticator::Basic(auth) => auth.requires_auth(path),
            Authenticator::Session(auth) => auth.requires_auth(path),
        }
    }

    /// Raw credential carrier: the `Authorization` header or the session cookie
    pub fn extract_carrier(&self, headers: &HeaderMap) -> Option<String> {
        match self {
            Authenticator::Null(_) => None,
            Authenticator::Basic(auth) => auth.extract_carrier(headers),
            Authenticator::Session(auth) => auth.extract_carrier(headers),
        }
    }

    pub async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        match self {
            Authenticator::Null(_) => None,
            Authenticator::Basic(auth) => auth.current_user(headers).await,
            Authenticator::Session(auth) => auth.current_user(headers).await,
        }
    }

    pub fn as_session(&self) -> Option<&SessionAuth<D, S>> {
        match self {
            Authenticator::Session(auth) => Some(auth),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::argon2::Argon2PasswordVerifier;
    use crate::infra::memory::{InMemorySessionStore, InMemoryUserDirectory};
    use crate::test_support::{basic_header, headers_with};
    use axum::http::header;

    fn build(auth_type: AuthType) -> Authenticator<InMemoryUserDirectory, InMemorySessionStore> {
        let config = AuthConfig {
            auth_type,
            ..AuthConfig::development()
        };
        Authenticator::from_config(
            &config,
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(Argon2PasswordVerifier::default()),
        )
    }

    #[test]
    fn test_strategy_follows_auth_type() {
        assert_eq!(build(AuthType::None).name(), "none");
        assert_eq!(build(AuthType::Basic).name(), "basic");
        assert_eq!(build(AuthType::Session).name(), "session");
        assert!(build(AuthType::SessionDb).as_session().is_some());
        assert!(build(AuthType::Basic).as_session().is_none());
    }

    #[test]
    fn test_all_strategies_share_exclusions() {
        for auth_type in [AuthType::None, AuthType::Basic, AuthType::Session] {
            let auth = build(auth_type);
            assert!(!auth.requires_auth("/api/v1/status"));
            assert!(!auth.requires_auth("/api/v1/auth_session/login/"));
            assert!(auth.requires_auth("/api/v1/users/me"));
        }
    }

    #[tokio::test]
    async fn test_null_never_authenticates() {
        let auth = build(AuthType::None);
        let headers = headers_with(header::AUTHORIZATION, &basic_header("bob@x.com", "hunter2"));
        assert!(auth.extract_carrier(&headers).is_none());
        assert!(auth.current_user(&headers).await.is_none());
    }

    #[test]
    fn test_carrier_depends_on_strategy() {
        let mut headers = headers_with(header::AUTHORIZATION, "Basic abc");
        headers.insert(header::COOKIE, "_my_session_id=xyz".parse().unwrap());

        assert_eq!(
            build(AuthType::Basic).extract_carrier(&headers).as_deref(),
            Some("Basic abc")
        );
        assert_eq!(
            build(AuthType::Session).extract_carrier(&headers).as_deref(),
            Some("xyz")
        );
    }
}
