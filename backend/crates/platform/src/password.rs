//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of clear text passwords
//! - Constant-time comparison (inside `argon2`)
//! - Optional application-wide pepper

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Nothing to hash
    #[error("Password cannot be empty")]
    Empty,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// The input is NFKC-normalized so that visually identical passwords typed
/// on different keyboards hash the same way. No strength policy is applied
/// here: the same type carries passwords submitted at login, which must be
/// checked as given.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a password, rejecting the empty string
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordHashError> {
        let raw = Zeroizing::new(raw.into());
        if raw.is_empty() {
            return Err(PasswordHashError::Empty);
        }
        Ok(Self(raw.nfkc().collect()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string embeds algorithm, version, parameters, and salt, so a
/// stored value can always be verified without extra metadata.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher with an optional pepper
///
/// OWASP recommended parameters (`Argon2::default()`: m=19456, t=2, p=1).
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    pepper: Option<Vec<u8>>,
}

impl Argon2Hasher {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self { pepper }
    }

    /// Hash with a fresh random 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let bytes = password.peppered(self.pepper.as_deref());
        let salt = SaltString::generate(OsRng);

        let hash = Argon2::default()
            .hash_password(&bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// A hash that fails to parse never verifies.
    pub fn verify(&self, hashed: &HashedPassword, password: &ClearTextPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };
        let bytes = password.peppered(self.pepper.as_deref());

        Argon2::default().verify_password(&bytes, &parsed).is_ok()
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("peppered", &self.pepper.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::new(raw).unwrap()
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            ClearTextPassword::new(""),
            Err(PasswordHashError::Empty)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::default();
        let hashed = hasher.hash(&password("hunter2")).unwrap();

        assert!(hasher.verify(&hashed, &password("hunter2")));
        assert!(!hasher.verify(&hashed, &password("hunter3")));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2Hasher::default();
        let first = hasher.hash(&password("same-password")).unwrap();
        let second = hasher.hash(&password("same-password")).unwrap();
        assert_ne!(first.as_phc_string(), second.as_phc_string());
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = Argon2Hasher::new(Some(b"pepper".to_vec()));
        let plain = Argon2Hasher::default();
        let hashed = peppered.hash(&password("hunter2")).unwrap();

        assert!(peppered.verify(&hashed, &password("hunter2")));
        assert!(!plain.verify(&hashed, &password("hunter2")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = Argon2Hasher::default();
        let hashed = hasher.hash(&password("hunter2")).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&restored, &password("hunter2")));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", password("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }

    #[test]
    fn test_unicode_normalized() {
        let hasher = Argon2Hasher::default();
        // U+FB01 (ligature "fi") normalizes to "fi" under NFKC
        let hashed = hasher.hash(&password("\u{FB01}le")).unwrap();
        assert!(hasher.verify(&hashed, &password("file")));
    }
}
