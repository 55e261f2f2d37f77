//! Sign Out Use Case
//!
//! Invalidates the session named by the request cookie.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::application::authenticator::Authenticator;
use crate::domain::repository::{SessionStore, UserDirectory};
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<D, S> {
    authenticator: Arc<Authenticator<D, S>>,
}

impl<D, S> SignOutUseCase<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(authenticator: Arc<Authenticator<D, S>>) -> Self {
        Self { authenticator }
    }

    /// Fails with `NoSession` when nothing was destroyed
    pub async fn execute(&self, headers: &HeaderMap) -> AuthResult<()> {
        let sessions = self.authenticator.as_session().ok_or(AuthError::NotFound)?;

        if !sessions.destroy_session(headers).await? {
            return Err(AuthError::NoSession);
        }

        tracing::info!("User signed out");
        Ok(())
    }
}
