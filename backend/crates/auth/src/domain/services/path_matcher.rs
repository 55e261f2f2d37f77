//! Path exclusion matching
//!
//! Decides whether a request path may skip authentication. Anything not
//! explicitly excluded requires authentication.

/// Marks a pattern as a prefix match
const WILDCARD: char = '*';

/// Whether `path` needs authentication given `excluded` patterns
///
/// - a missing or empty path, or a missing or empty pattern set, requires auth
/// - one trailing `/` is stripped from the path and from every pattern
/// - a pattern ending in `*` matches any path starting with the rest of it
/// - any other pattern must equal the path
pub fn requires_auth<S: AsRef<str>>(path: Option<&str>, excluded: Option<&[S]>) -> bool {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return true;
    };
    let Some(excluded) = excluded.filter(|e| !e.is_empty()) else {
        return true;
    };

    let path = normalize(path);
    !excluded
        .iter()
        .any(|pattern| matches(normalize(pattern.as_ref()), path))
}

fn normalize(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

fn matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix(WILDCARD) {
        Some(prefix) => path.starts_with(prefix),
        None => pattern == path,
    }
}

/// Exclusion set configured for one authentication strategy
#[derive(Debug, Clone, Default)]
pub struct PathMatcher {
    patterns: Vec<String>,
}

impl PathMatcher {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn requires_auth(&self, path: &str) -> bool {
        requires_auth(Some(path), Some(self.patterns.as_slice()))
    }
}
