//! Core error type.
//!
//! Sub-crates define their own error enums; `NavError` covers the value and
//! configuration checks that live in `nav-core` itself.

use thiserror::Error;

/// The top-level error type for `nav-core`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `nav-core`.
pub type NavResult<T> = Result<T, NavError>;
