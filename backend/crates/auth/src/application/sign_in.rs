//! Sign In Use Case
//!
//! Checks an email/password pair and opens a session for the user.

use std::sync::Arc;

use kernel::id::SessionId;
use platform::password::ClearTextPassword;

use crate::application::authenticator::Authenticator;
use crate::application::user_lookup::first_user_with_email;
use crate::domain::entity::user::User;
use crate::domain::repository::{PasswordVerifier, SessionStore, UserDirectory};
use crate::error::{AuthError, AuthResult};

/// Sign in input, as submitted by the login form
#[derive(Debug, Default)]
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    /// Value for the session cookie
    pub session_id: SessionId,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<D, S> {
    authenticator: Arc<Authenticator<D, S>>,
    directory: Arc<D>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl<D, S> SignInUseCase<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(
        authenticator: Arc<Authenticator<D, S>>,
        directory: Arc<D>,
        verifier: Arc<dyn PasswordVerifier>,
    ) -> Self {
        Self {
            authenticator,
            directory,
            verifier,
        }
    }

    /// A session exists afterwards only if this returns `Ok`
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let sessions = self.authenticator.as_session().ok_or(AuthError::NotFound)?;

        let email = input
            .email
            .filter(|e| !e.is_empty())
            .ok_or(AuthError::EmailMissing)?;
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::PasswordMissing)?;

        let user = first_user_with_email(self.directory.as_ref(), &email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password = ClearTextPassword::new(password)?;
        if !self.verifier.verify(&user.password_hash, &password) {
            tracing::info!(user_id = %user.id, "Sign in rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        let session_id = sessions.create_session(&user.id).await?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput { session_id, user })
    }
}
