//! Domain Services
//!
//! Pure functions over request data: no shared state, safe to call from
//! any number of tasks at once.

pub mod basic_credentials;
pub mod path_matcher;

pub use basic_credentials::{
    BASIC_SCHEME, decode_basic_header, decode_token, extract_base64_token, split_credentials,
};
pub use path_matcher::{PathMatcher, requires_auth};
