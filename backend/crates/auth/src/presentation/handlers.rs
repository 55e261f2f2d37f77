//! HTTP Handlers

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{Authenticator, SignInInput, SignInUseCase, SignOutUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::{PasswordVerifier, SessionStore, UserDirectory};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{EmptyResponse, LoginForm, StatusResponse, UserResponse};

/// Shared state for auth handlers
pub struct AuthAppState<D, S> {
    pub authenticator: Arc<Authenticator<D, S>>,
    pub directory: Arc<D>,
    pub verifier: Arc<dyn PasswordVerifier>,
    pub config: Arc<AuthConfig>,
}

// Derived Clone would require `D: Clone` and `S: Clone`
impl<D, S> Clone for AuthAppState<D, S> {
    fn clone(&self) -> Self {
        Self {
            authenticator: self.authenticator.clone(),
            directory: self.directory.clone(),
            verifier: self.verifier.clone(),
            config: self.config.clone(),
        }
    }
}

impl<D, S> AuthAppState<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    /// Build the configured strategy over the given collaborators
    pub fn new(
        config: AuthConfig,
        directory: Arc<D>,
        store: Arc<S>,
        verifier: Arc<dyn PasswordVerifier>,
    ) -> Self {
        let authenticator =
            Authenticator::from_config(&config, directory.clone(), store, verifier.clone());
        Self {
            authenticator: Arc::new(authenticator),
            directory,
            verifier,
            config: Arc::new(config),
        }
    }
}

/// User resolved by the auth middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// ============================================================================
// Session Login / Logout
// ============================================================================

/// POST /api/v1/auth_session/login
pub async fn login<D, S>(
    State(state): State<AuthAppState<D, S>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AuthResult<impl IntoResponse>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    // A body that is not a form carries neither field
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            tracing::debug!(error = %e, "Login body is not a form");
            LoginForm::default()
        }
    };

    let use_case = SignInUseCase::new(
        state.authenticator.clone(),
        state.directory.clone(),
        state.verifier.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: form.email,
            password: form.password,
        })
        .await?;

    let cookie = set_cookie_header(&state.config.session_cookie(), &output.session_id.to_string());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

/// DELETE /api/v1/auth_session/logout
pub async fn logout<D, S>(
    State(state): State<AuthAppState<D, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    SignOutUseCase::new(state.authenticator.clone())
        .execute(&headers)
        .await?;

    let cookie = delete_cookie_header(&state.config.session_cookie());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(EmptyResponse::default()),
    ))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/v1/users/me
pub async fn users_me(
    current_user: Option<Extension<CurrentUser>>,
) -> AuthResult<Json<UserResponse>> {
    let Extension(CurrentUser(user)) = current_user.ok_or(AuthError::NotFound)?;
    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Status
// ============================================================================

/// GET /api/v1/status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "OK" })
}

/// JSON 404 for unmatched paths
pub async fn not_found() -> AuthError {
    AuthError::NotFound
}
