//! Directory lookups shared by the Basic strategy and session login

use crate::domain::entity::user::User;
use crate::domain::repository::{UserDirectory, UserField};
use crate::error::AuthResult;

/// First user registered under `email`
///
/// The directory may return several records; the first one wins. This
/// relies on email being unique upstream, which the directory does not
/// guarantee in every backend.
pub async fn first_user_with_email<D>(directory: &D, email: &str) -> AuthResult<Option<User>>
where
    D: UserDirectory + Sync,
{
    let users = directory.find_by_field(UserField::Email, email).await?;
    if users.len() > 1 {
        tracing::warn!(matches = users.len(), "Email matched several users, using the first");
    }
    Ok(users.into_iter().next())
}
