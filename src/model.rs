//! Data types for store operations.

use bytes::Bytes;

/// A key-value entry returned by iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The key.
    pub key: String,
    /// The decompressed value.
    pub value: Bytes,
}

/// A value accepted by [`put`](crate::ZlibKvDb::put).
///
/// Text is encoded with the store's configured
/// [`TextEncoding`](crate::TextEncoding) before compression; bytes are
/// compressed as-is. Any other value type is rejected at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Text, to be encoded before compression.
    Text(String),
    /// Raw bytes, compressed as-is.
    Bytes(Bytes),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(bytes: &[u8; N]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(bytes))
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}
