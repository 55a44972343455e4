//! Error types for zlibkv operations.

use thiserror::Error;

/// Error type for zlibkv operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Storage-related errors from the underlying sled engine.
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored bytes failed to decompress (corruption, or a row written
    /// before compression was introduced).
    #[error("codec error: {0}")]
    Codec(String),

    /// Text could not be encoded with the configured text encoding.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Compression level outside the supported `0..=9` range.
    #[error("invalid compression level: {0} (expected 0..=9)")]
    InvalidLevel(u32),

    /// Key was required to exist but did not.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Operation attempted on a closed store handle.
    #[error("store is closed")]
    Closed,
}

impl From<sled::Error> for Error {
    fn from(err: sled::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Result type alias for zlibkv operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_key_not_found_with_key() {
        // given
        let err = Error::KeyNotFound("user:123".to_string());

        // then
        assert_eq!(err.to_string(), "key not found: user:123");
    }

    #[test]
    fn should_display_invalid_level_with_bounds() {
        // given
        let err = Error::InvalidLevel(12);

        // then
        assert_eq!(
            err.to_string(),
            "invalid compression level: 12 (expected 0..=9)"
        );
    }

    #[test]
    fn should_convert_sled_error_to_storage() {
        // given
        let sled_err = sled::Error::Unsupported("no".to_string());

        // when
        let err: Error = sled_err.into();

        // then
        assert!(matches!(err, Error::Storage(_)));
    }
}
