//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::domain::repository::{SessionStore, UserDirectory};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Routes under `/api/v1`; session endpoints exist only for the session strategy
fn api_routes<D, S>(state: &AuthAppState<D, S>) -> Router<AuthAppState<D, S>>
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let mut routes = Router::new()
        .route("/status", get(handlers::status))
        .route("/status/", get(handlers::status))
        .route("/users/me", get(handlers::users_me))
        .route("/users/me/", get(handlers::users_me));

    if state.authenticator.as_session().is_some() {
        routes = routes
            .route("/auth_session/login", post(handlers::login::<D, S>))
            .route("/auth_session/login/", post(handlers::login::<D, S>))
            .route("/auth_session/logout", delete(handlers::logout::<D, S>))
            .route("/auth_session/logout/", delete(handlers::logout::<D, S>));
    }

    routes
}

/// Full API router with the auth middleware in front of every route
///
/// The middleware sits outside the `/api/v1` nest so it matches exclusion
/// patterns against the full request path. It also guards the fallback, so
/// unknown protected paths answer 401 before 404.
pub fn auth_router<D, S>(state: AuthAppState<D, S>) -> Router
where
    D: UserDirectory + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .nest("/api/v1", api_routes(&state))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<D, S>,
        ))
        .with_state(state)
}
