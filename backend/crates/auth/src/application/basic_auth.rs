//! Basic Auth Strategy
//!
//! Every request carries `Authorization: Basic <base64(email:password)>`;
//! the pair is checked against the user directory each time.

use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::application::user_lookup::first_user_with_email;
use crate::domain::entity::user::User;
use crate::domain::repository::{PasswordVerifier, UserDirectory};
use crate::domain::services::{PathMatcher, decode_basic_header};
use crate::domain::value_object::credentials::DecodedCredentials;
use crate::error::{AuthError, AuthResult};

/// Raw `Authorization` header, if present and visible ASCII
pub fn authorization_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()
        .map(str::to_string)
}

pub struct BasicAuth<D> {
    paths: PathMatcher,
    directory: Arc<D>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl<D> BasicAuth<D>
where
    D: UserDirectory + Send + Sync + 'static,
{
    pub fn new(paths: PathMatcher, directory: Arc<D>, verifier: Arc<dyn PasswordVerifier>) -> Self {
        Self {
            paths,
            directory,
            verifier,
        }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        self.paths.requires_auth(path)
    }

    pub fn extract_carrier(&self, headers: &HeaderMap) -> Option<String> {
        authorization_header(headers)
    }

    /// User matching the credentials, if the password verifies
    pub async fn user_from_credentials(&self, credentials: &DecodedCredentials) -> AuthResult<User> {
        let user = first_user_with_email(self.directory.as_ref(), credentials.identifier())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.verifier.verify(&user.password_hash, credentials.secret()) {
            return Err(AuthError::WrongPassword);
        }

        Ok(user)
    }

    /// Run the whole pipeline, reporting which step failed
    pub async fn authenticate(&self, headers: &HeaderMap) -> AuthResult<User> {
        let carrier = self.extract_carrier(headers);
        let credentials = decode_basic_header(carrier.as_deref())?;
        self.user_from_credentials(&credentials).await
    }

    /// Authenticated user, or `None` on any failure
    pub async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        match self.authenticate(headers).await {
            Ok(user) => Some(user),
            Err(AuthError::DirectoryUnavailable(e)) => {
                tracing::warn!(error = %e, "Basic auth lookup failed");
                None
            }
            Err(e) => {
                tracing::debug!(reason = %e, "Basic auth rejected");
                None
            }
        }
    }
}
