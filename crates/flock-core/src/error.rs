//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `FlockError` as one
//! variant where settings validation can fail on their path.

use thiserror::Error;

/// Errors raised while validating flock settings and simulation config.
#[derive(Debug, Error)]
pub enum FlockError {
    #[error("setting `{name}` must be finite and non-negative, got {value}")]
    InvalidSetting { name: &'static str, value: f32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `flock-core`.
pub type FlockResult<T> = Result<T, FlockError>;
