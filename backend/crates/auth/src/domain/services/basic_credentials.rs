//! HTTP Basic credential decoding
//!
//! `Authorization: Basic <base64(identifier:secret)>` is decoded in three
//! steps, each with its own failure. Nothing here panics on hostile input.

use platform::crypto::base64_to_text;

use crate::domain::value_object::credentials::DecodedCredentials;
use crate::error::{AuthError, AuthResult};

/// Scheme prefix, case-sensitive, exactly one space
pub const BASIC_SCHEME: &str = "Basic ";

/// Strip the `Basic ` scheme and return the base64 token
pub fn extract_base64_token(header: Option<&str>) -> AuthResult<&str> {
    header
        .and_then(|value| value.strip_prefix(BASIC_SCHEME))
        .ok_or(AuthError::MissingOrMalformedHeader)
}

/// Decode the token into UTF-8 text
pub fn decode_token(token: &str) -> AuthResult<String> {
    base64_to_text(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected Basic token");
        AuthError::InvalidEncoding
    })
}

/// Split at the first `:`; the secret keeps any later colons
pub fn split_credentials(decoded: &str) -> AuthResult<DecodedCredentials> {
    let (identifier, secret) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;
    DecodedCredentials::new(identifier, secret)
}

/// Full pipeline from raw header value to credentials
pub fn decode_basic_header(header: Option<&str>) -> AuthResult<DecodedCredentials> {
    let token = extract_base64_token(header)?;
    let decoded = decode_token(token)?;
    split_credentials(&decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::PasswordVerifier;
    use crate::infra::argon2::Argon2PasswordVerifier;
    use platform::crypto::to_base64;
    use platform::password::ClearTextPassword;

    /// Whether `creds` carries exactly `expected` as its secret
    fn secret_is(creds: &DecodedCredentials, expected: &str) -> bool {
        let verifier = Argon2PasswordVerifier::default();
        let hash = verifier
            .hash(&ClearTextPassword::new(expected).unwrap())
            .unwrap();
        verifier.verify(&hash, creds.secret())
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", to_base64(raw.as_bytes()))
    }

    #[test]
    fn test_decode_roundtrip() {
        let header = basic("alice@x.com:secret");
        let creds = decode_basic_header(Some(&header)).unwrap();
        assert_eq!(creds.identifier(), "alice@x.com");
        assert!(secret_is(&creds, "secret"));
        assert!(!secret_is(&creds, "secret2"));
    }

    #[test]
    fn test_extract_requires_basic_scheme() {
        assert!(matches!(
            extract_base64_token(None),
            Err(AuthError::MissingOrMalformedHeader)
        ));
        assert!(matches!(
            extract_base64_token(Some("Bearer xyz")),
            Err(AuthError::MissingOrMalformedHeader)
        ));
        assert!(matches!(
            extract_base64_token(Some("basic abc")),
            Err(AuthError::MissingOrMalformedHeader)
        ));
        assert!(matches!(
            extract_base64_token(Some("Basic")),
            Err(AuthError::MissingOrMalformedHeader)
        ));
        assert_eq!(extract_base64_token(Some("Basic abc")).unwrap(), "abc");
    }

    #[test]
    fn test_decode_rejects_bad_payloads() {
        assert!(matches!(
            decode_token("not-base64!!"),
            Err(AuthError::InvalidEncoding)
        ));
        assert!(matches!(
            decode_token(&to_base64(&[0xc3, 0x28])),
            Err(AuthError::InvalidEncoding)
        ));
        assert!(matches!(
            decode_basic_header(Some("Basic  YWxpY2U6eA==")),
            Err(AuthError::InvalidEncoding)
        ));
    }

    #[test]
    fn test_split_on_first_colon() {
        let creds = split_credentials("bob@x.com:pa:ss:word").unwrap();
        assert_eq!(creds.identifier(), "bob@x.com");
        assert!(secret_is(&creds, "pa:ss:word"));
        assert!(!secret_is(&creds, "pa"));

        let header = basic("bob@x.com:pa:ss:word");
        let creds = decode_basic_header(Some(&header)).unwrap();
        assert_eq!(creds.identifier(), "bob@x.com");
        assert!(secret_is(&creds, "pa:ss:word"));
    }

    #[test]
    fn test_split_requires_colon() {
        assert!(matches!(
            split_credentials("no-separator"),
            Err(AuthError::MalformedCredentials)
        ));
        let header = basic("no-separator");
        assert!(matches!(
            decode_basic_header(Some(&header)),
            Err(AuthError::MalformedCredentials)
        ));
    }

    #[test]
    fn test_split_rejects_empty_halves() {
        assert!(matches!(
            split_credentials(":secret"),
            Err(AuthError::MalformedCredentials)
        ));
        assert!(matches!(
            split_credentials("alice@x.com:"),
            Err(AuthError::MalformedCredentials)
        ));
    }
}
