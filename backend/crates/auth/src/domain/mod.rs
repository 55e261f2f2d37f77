//! Domain Layer
//!
//! Entities, value objects, pure authentication services, and the traits
//! through which the gateway reaches its collaborators.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{session::Session, user::User};
pub use repository::{PasswordVerifier, SessionStore, UserDirectory, UserField};
