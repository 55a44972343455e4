//! Configuration options for opening a store.

use std::path::PathBuf;

use bytes::Bytes;

use crate::codec::Level;
use crate::error::{Error, Result};

/// Configuration for opening a [`ZlibKvDb`](crate::ZlibKvDb).
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the durable store on disk.
    pub path: PathBuf,

    /// Text encoding applied to string values before compression.
    pub encoding: TextEncoding,

    /// Default compression level for writes.
    pub level: Level,
}

impl Config {
    /// Creates a configuration for the given path with default encoding
    /// and compression level.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: TextEncoding::default(),
            level: Level::default(),
        }
    }

    /// Sets the text encoding for string values.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the default compression level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

/// Text encoding used to normalize string values to bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, the default. Accepts any Rust string.
    #[default]
    Utf8,

    /// ISO-8859-1. One byte per code point; rejects code points above U+00FF.
    Latin1,
}

impl TextEncoding {
    /// Encodes `text` into bytes.
    ///
    /// Returns [`Error::Encoding`] if the text contains characters that the
    /// encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Bytes> {
        match self {
            TextEncoding::Utf8 => Ok(Bytes::copy_from_slice(text.as_bytes())),
            TextEncoding::Latin1 => {
                let mut encoded = Vec::with_capacity(text.len());
                for ch in text.chars() {
                    let code = ch as u32;
                    if code > 0xFF {
                        return Err(Error::Encoding(format!(
                            "character {:?} (U+{:04X}) is not representable in Latin-1",
                            ch, code
                        )));
                    }
                    encoded.push(code as u8);
                }
                Ok(Bytes::from(encoded))
            }
        }
    }
}
