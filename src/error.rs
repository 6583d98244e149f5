//! Error types for the cache core
//!
//! Cache reads and writes never fail; these errors cover configuration
//! loading and strict text views of payloads.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A payload was read as text but is not valid UTF-8
    #[error("Invalid UTF-8 payload: {0}")]
    InvalidUtf8(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache core.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidConfig("CACHE_BYTES=abc".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: CACHE_BYTES=abc");

        let err = CacheError::InvalidUtf8("byte 0".to_string());
        assert_eq!(err.to_string(), "Invalid UTF-8 payload: byte 0");
    }
}
