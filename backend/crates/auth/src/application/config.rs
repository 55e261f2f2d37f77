//! Application Configuration
//!
//! Everything the gateway reads from the process environment, resolved once
//! at startup.

use std::str::FromStr;
use std::time::Duration;

pub use platform::cookie::SameSite;
use platform::cookie::{CookieConfig, is_valid_cookie_name};

use crate::error::{AuthError, AuthResult};

/// Default session cookie name
pub const DEFAULT_SESSION_NAME: &str = "_my_session_id";

/// Paths reachable without credentials unless `AUTH_EXCLUDED_PATHS` says otherwise
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "/api/v1/status/",
    "/api/v1/auth_session/login/",
    "/api/v1/auth_session/logout/",
];

/// Which authentication strategy guards the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    /// No strategy: protected routes are unreachable
    #[default]
    None,
    /// HTTP Basic credentials checked on every request
    Basic,
    /// Session cookie backed by the in-process store
    Session,
    /// Session cookie backed by the database
    SessionDb,
}

impl FromStr for AuthType {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        match s.trim() {
            "" | "auth" => Ok(AuthType::None),
            "basic_auth" => Ok(AuthType::Basic),
            "session_auth" | "session_exp_auth" => Ok(AuthType::Session),
            "session_db_auth" => Ok(AuthType::SessionDb),
            other => Err(AuthError::Config(format!("unknown AUTH_TYPE: {other}"))),
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub auth_type: AuthType,
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session lifetime; `None` keeps sessions until logout
    pub session_duration: Option<Duration>,
    /// Exclusion patterns handed to the active strategy
    pub excluded_paths: Vec<String>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_type: AuthType::None,
            session_cookie_name: DEFAULT_SESSION_NAME.to_string(),
            session_duration: None,
            excluded_paths: DEFAULT_EXCLUDED_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> AuthResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through `var`, which returns the value of a key
    ///
    /// Recognised keys: `AUTH_TYPE`, `SESSION_NAME`, `SESSION_DURATION`
    /// (seconds), `AUTH_EXCLUDED_PATHS` (comma separated), `COOKIE_SECURE`,
    /// `COOKIE_SAME_SITE`, `PASSWORD_PEPPER`.
    pub fn from_vars<F>(var: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let auth_type: AuthType = var("AUTH_TYPE")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        let session_cookie_name = var("SESSION_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.session_cookie_name);
        if !is_valid_cookie_name(&session_cookie_name) {
            return Err(AuthError::Config(format!(
                "invalid SESSION_NAME: {session_cookie_name}"
            )));
        }

        let session_duration = var("SESSION_DURATION").and_then(|v| parse_duration(&v));

        let excluded_paths = match var("AUTH_EXCLUDED_PATHS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.excluded_paths,
        };

        let cookie_secure = match var("COOKIE_SECURE") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| AuthError::Config(format!("invalid COOKIE_SECURE: {v}")))?,
            None => defaults.cookie_secure,
        };

        let cookie_same_site = match var("COOKIE_SAME_SITE") {
            Some(v) => SameSite::parse(&v)
                .ok_or_else(|| AuthError::Config(format!("invalid COOKIE_SAME_SITE: {v}")))?,
            None => defaults.cookie_same_site,
        };

        let password_pepper = var("PASSWORD_PEPPER")
            .filter(|v| !v.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            auth_type,
            session_cookie_name,
            session_duration,
            excluded_paths,
            cookie_secure,
            cookie_same_site,
            password_pepper,
        })
    }

    /// Attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: self.session_duration.map(|d| d.as_secs()),
            ..CookieConfig::session(self.session_cookie_name.clone())
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

/// Positive whole seconds; anything else disables expiry
fn parse_duration(value: &str) -> Option<Duration> {
    match value.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs as u64)),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
