//! Application Layer
//!
//! Authentication strategies and use cases.

pub mod authenticator;
pub mod basic_auth;
pub mod config;
pub mod session_auth;
pub mod sign_in;
pub mod sign_out;
pub mod user_lookup;

// Re-exports
pub use authenticator::{Authenticator, NullAuth};
pub use basic_auth::BasicAuth;
pub use config::{AuthConfig, AuthType};
pub use session_auth::SessionAuth;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
