//! Auth Middleware
//!
//! Guards every route with the active strategy. Paths the strategy
//! excludes pass through untouched.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::repository::{SessionStore, UserDirectory};
use crate::error::AuthError;
use crate::presentation::handlers::{AuthAppState, CurrentUser};

/// Reject unauthenticated requests to protected paths with 401
///
/// On success the resolved user is stored in the request extensions as
/// [`CurrentUser`].
pub async fn require_auth<D, S>(
    State(state): State<AuthAppState<D, S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    if !state.authenticator.requires_auth(req.uri().path()) {
        return next.run(req).await;
    }

    // Only the parts are held across the lookup; the body stays untouched
    let (mut parts, body) = req.into_parts();

    let Some(user) = state.authenticator.current_user(&parts.headers).await else {
        tracing::debug!(
            path = %parts.uri.path(),
            strategy = state.authenticator.name(),
            "Rejected unauthenticated request"
        );
        return AuthError::Unauthorized.into_response();
    };

    parts.extensions.insert(CurrentUser(user));
    next.run(Request::from_parts(parts, body)).await
}
