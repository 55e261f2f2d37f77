//! Argon2id password verifier

use platform::password::{Argon2Hasher, ClearTextPassword, HashedPassword};

use crate::domain::repository::PasswordVerifier;
use crate::error::AuthResult;

#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordVerifier {
    hasher: Argon2Hasher,
}

impl Argon2PasswordVerifier {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            hasher: Argon2Hasher::new(pepper),
        }
    }
}

impl PasswordVerifier for Argon2PasswordVerifier {
    fn hash(&self, password: &ClearTextPassword) -> AuthResult<HashedPassword> {
        Ok(self.hasher.hash(password)?)
    }

    fn verify(&self, password_hash: &HashedPassword, password: &ClearTextPassword) -> bool {
        self.hasher.verify(password_hash, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pepper_must_match() {
        let password = ClearTextPassword::new("hunter2").unwrap();
        let peppered = Argon2PasswordVerifier::new(Some(b"pepper".to_vec()));
        let hash = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&hash, &password));
        assert!(!Argon2PasswordVerifier::default().verify(&hash, &password));
    }
}
