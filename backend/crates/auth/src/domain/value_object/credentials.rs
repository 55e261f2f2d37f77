//! Decoded Basic credentials

use platform::password::ClearTextPassword;

use crate::error::{AuthError, AuthResult};

/// `(identifier, secret)` pair taken from a Basic authorization header
///
/// Both halves are non-empty. The secret is zeroized on drop and redacted
/// in `Debug` output.
#[derive(Debug)]
pub struct DecodedCredentials {
    identifier: String,
    secret: ClearTextPassword,
}

impl DecodedCredentials {
    pub fn new(identifier: &str, secret: &str) -> AuthResult<Self> {
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::MalformedCredentials);
        }
        let secret =
            ClearTextPassword::new(secret).map_err(|_| AuthError::MalformedCredentials)?;

        Ok(Self {
            identifier: identifier.to_string(),
            secret,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &ClearTextPassword {
        &self.secret
    }
}
