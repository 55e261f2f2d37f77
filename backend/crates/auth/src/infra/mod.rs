//! Infrastructure Layer
//!
//! Directory, session store and hashing implementations.

pub mod argon2;
pub mod memory;
pub mod postgres;

pub use argon2::Argon2PasswordVerifier;
pub use memory::{InMemorySessionStore, InMemoryUserDirectory};
pub use postgres::PgAuthRepository;
