//! User Entity
//!
//! The record the gateway authenticates against. Owned by the user
//! directory; the gateway only holds one for the duration of a request.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub id: UserId,
    /// Login identifier (canonical form)
    pub email: Email,
    /// Argon2id PHC string; never serialized
    pub password_hash: HashedPassword,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            email,
            password_hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let hash = HashedPassword::from_phc_string(
            "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$MTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTI",
        )
        .unwrap();
        User::new(Email::new("bob@x.com").unwrap(), hash)
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        assert_ne!(user().id, user().id);
    }
}
