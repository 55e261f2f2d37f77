//! Cookie Management Infrastructure
//!
//! Parsing of the request `Cookie` header and construction of `Set-Cookie`
//! values for session cookies.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    /// Parse a policy name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(SameSite::Strict),
            "lax" => Some(SameSite::Lax),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

/// Cookie attributes used when issuing or clearing a cookie
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<u64>,
}

impl CookieConfig {
    /// HttpOnly cookie scoped to the whole site
    pub fn session(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header that makes the browser drop the cookie
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.name, self.path
        )
    }
}

/// Whether `name` is a valid cookie name (an RFC 6265 token)
pub fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\'
                        | b'"' | b'/' | b'[' | b']' | b'?' | b'=' | b'{' | b'}'
                )
        })
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is searched; the first pair whose name matches
/// exactly wins. Values may themselves contain `=`.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

/// Create a Set-Cookie header value
pub fn set_cookie_header(config: &CookieConfig, value: &str) -> HeaderValue {
    HeaderValue::from_str(&config.build_set_cookie(value))
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Create a Set-Cookie header value that clears the cookie
pub fn delete_cookie_header(config: &CookieConfig) -> HeaderValue {
    HeaderValue::from_str(&config.build_delete_cookie())
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_name_validation() {
        assert!(is_valid_cookie_name("_my_session_id"));
        assert!(is_valid_cookie_name("session-v2"));
        assert!(!is_valid_cookie_name(""));
        assert!(!is_valid_cookie_name("my session"));
        assert!(!is_valid_cookie_name("a=b"));
        assert!(!is_valid_cookie_name("a;b"));
        assert!(!is_valid_cookie_name("s\u{e9}ance"));
        assert!(!is_valid_cookie_name("tab\there"));
    }

    #[test]
    fn test_session_cookie_build() {
        let config = CookieConfig {
            max_age_secs: Some(3600),
            ..CookieConfig::session("_my_session_id")
        };

        let cookie = config.build_set_cookie("abc-123");
        assert!(cookie.starts_with("_my_session_id=abc-123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_insecure_cookie_omits_secure() {
        let config = CookieConfig {
            secure: false,
            ..CookieConfig::session("sid")
        };
        assert!(!config.build_set_cookie("x").contains("Secure"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = CookieConfig::session("sid").build_delete_cookie();
        assert!(cookie.starts_with("sid=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; _my_session_id=abc123; other=x=y"),
        );

        assert_eq!(
            extract_cookie(&headers, "_my_session_id"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "other"), Some("x=y".to_string()));
        assert_eq!(extract_cookie(&headers, "_my_session"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
        assert_eq!(extract_cookie(&headers, "b"), Some("2".to_string()));
    }

    #[test]
    fn test_same_site_parse() {
        assert_eq!(SameSite::parse("STRICT"), Some(SameSite::Strict));
        assert_eq!(SameSite::parse(" lax "), Some(SameSite::Lax));
        assert_eq!(SameSite::parse("bogus"), None);
    }
}
