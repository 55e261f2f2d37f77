//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, repository traits, path and credential rules
//! - `application/` - Strategies, use cases and configuration
//! - `infra/` - In-memory and PostgreSQL stores, Argon2 verifier
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Strategies
//! - `none` - protected paths are always rejected
//! - `basic` - `Authorization: Basic` checked against the user directory
//! - `session` - opaque session id in a cookie, optional expiry
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Session ids are random UUID v4, never derived from user data
//! - Failed authentication answers a uniform 401; only login says why

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthType};
pub use application::{Authenticator, BasicAuth, NullAuth, SessionAuth};
pub use domain::repository::{PasswordVerifier, SessionStore, UserDirectory, UserField};
pub use error::{AuthError, AuthResult};
pub use infra::{
    Argon2PasswordVerifier, InMemorySessionStore, InMemoryUserDirectory, PgAuthRepository,
};
pub use presentation::handlers::{AuthAppState, CurrentUser};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
