//! Value Object Module

pub mod credentials;
pub mod email;
