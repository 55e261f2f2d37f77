//! Repository Traits
//!
//! Interfaces to the gateway's collaborators. Implementations live in the
//! infrastructure layer.

use kernel::id::{SessionId, UserId};
use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::entity::{session::Session, user::User};
use crate::error::AuthResult;

/// Searchable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Email,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Email => "email",
        }
    }
}

/// User directory trait
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// All users whose `field` equals `value`, in a stable order
    ///
    /// Callers use the first element; uniqueness of the field is assumed,
    /// not guaranteed.
    async fn find_by_field(&self, field: UserField, value: &str) -> AuthResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Store a new user
    async fn insert(&self, user: &User) -> AuthResult<()>;
}

/// Session store trait
///
/// Implementations must be safe to call concurrently and must never hand
/// out an identifier that is already live.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Open a session for `user_id` and return its fresh identifier
    async fn create(&self, user_id: &UserId) -> AuthResult<SessionId>;

    /// Find a live session
    async fn lookup(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Remove a session; `true` iff it existed
    async fn destroy(&self, session_id: &SessionId) -> AuthResult<bool>;

    /// Number of stored sessions
    async fn len(&self) -> AuthResult<usize>;
}

/// Salted one-way password hashing
pub trait PasswordVerifier: Send + Sync {
    fn hash(&self, password: &ClearTextPassword) -> AuthResult<HashedPassword>;

    fn verify(&self, password_hash: &HashedPassword, password: &ClearTextPassword) -> bool;
}
