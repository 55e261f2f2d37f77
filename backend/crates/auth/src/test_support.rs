//! Fixtures shared by the unit and router tests

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use kernel::id::UserId;
use platform::crypto::to_base64;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::entity::user::User;
use crate::domain::repository::{PasswordVerifier, UserDirectory, UserField};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Valid PHC string that no test password matches
const PLACEHOLDER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$MTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTI";

/// User with a placeholder hash, not stored anywhere
pub fn user(email: &str) -> User {
    User::new(
        Email::new(email).unwrap(),
        HashedPassword::from_phc_string(PLACEHOLDER_HASH).unwrap(),
    )
}

/// Hash `password` and register a user under `email`
pub async fn seed_user<D>(
    directory: &D,
    verifier: &dyn PasswordVerifier,
    email: &str,
    password: &str,
) -> User
where
    D: UserDirectory,
{
    let hash = verifier
        .hash(&ClearTextPassword::new(password).unwrap())
        .unwrap();
    let user = User::new(Email::new(email).unwrap(), hash);
    directory.insert(&user).await.unwrap();
    user
}

/// `Basic <base64(email:password)>`
pub fn basic_header(email: &str, password: &str) -> String {
    format!("Basic {}", to_base64(format!("{email}:{password}").as_bytes()))
}

pub fn headers_with(name: HeaderName, value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(name, HeaderValue::from_str(value).unwrap());
    headers
}

/// Directory whose backend is always down
pub struct FailingDirectory;

impl UserDirectory for FailingDirectory {
    async fn find_by_field(&self, _field: UserField, _value: &str) -> AuthResult<Vec<User>> {
        Err(AuthError::DirectoryUnavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _user_id: &UserId) -> AuthResult<Option<User>> {
        Err(AuthError::DirectoryUnavailable("connection refused".to_string()))
    }

    async fn insert(&self, _user: &User) -> AuthResult<()> {
        Err(AuthError::DirectoryUnavailable("connection refused".to_string()))
    }
}
