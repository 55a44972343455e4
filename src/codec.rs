//! Value compression and decompression.
//!
//! Values are stored in the zlib format via `flate2`. Compression is
//! deterministic and lossless; decompression of anything that is not valid
//! zlib data (corrupted rows, rows written before compression was
//! introduced) fails with [`Error::Codec`].

use std::io::{Read, Write};

use bytes::Bytes;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// Validated zlib compression level.
///
/// Levels range from 0 (no compression) to 9 (best compression). The
/// default is [`Level::BEST`], favoring storage size over write speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(u32);

impl Level {
    /// No compression (level 0). Still produces valid zlib framing.
    pub const NONE: Level = Level(0);

    /// Fastest compression (level 1).
    pub const FAST: Level = Level(1);

    /// Best compression (level 9).
    pub const BEST: Level = Level(9);

    /// Creates a level, rejecting values outside `0..=9`.
    pub fn new(level: u32) -> Result<Level> {
        if level > 9 {
            return Err(Error::InvalidLevel(level));
        }
        Ok(Level(level))
    }

    /// Returns the numeric level.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::BEST
    }
}

/// Compresses `data` at the given level.
pub fn compress(data: &[u8], level: Level) -> Result<Bytes> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level.value()));
    encoder
        .write_all(data)
        .map_err(|e| Error::Codec(e.to_string()))?;
    let compressed = encoder.finish().map_err(|e| Error::Codec(e.to_string()))?;
    Ok(Bytes::from(compressed))
}

/// Decompresses zlib-compressed `data`.
///
/// Returns [`Error::Codec`] if the input is not valid zlib data.
pub fn decompress(data: &[u8]) -> Result<Bytes> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::Codec(e.to_string()))?;
    Ok(Bytes::from(decompressed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_bytes() {
        // given
        let original = b"hello compressed world".as_slice();

        // when
        let compressed = compress(original, Level::default()).unwrap();
        let decompressed = decompress(&compressed).unwrap();

        // then
        assert_eq!(&decompressed[..], original);
    }

    #[test]
    fn should_roundtrip_empty_input() {
        // when
        let compressed = compress(b"", Level::default()).unwrap();
        let decompressed = decompress(&compressed).unwrap();

        // then
        assert!(decompressed.is_empty());
        // zlib framing is present even for empty input
        assert!(!compressed.is_empty());
    }

    #[test]
    fn should_roundtrip_at_every_level() {
        // given
        let original = vec![0xABu8; 4096];

        for level in 0..=9 {
            // when
            let compressed = compress(&original, Level::new(level).unwrap()).unwrap();
            let decompressed = decompress(&compressed).unwrap();

            // then
            assert_eq!(&decompressed[..], &original[..], "level {}", level);
        }
    }

    #[test]
    fn should_shrink_repetitive_input_at_best_level() {
        // given
        let original = vec![b'z'; 64 * 1024];

        // when
        let compressed = compress(&original, Level::BEST).unwrap();

        // then
        assert!(compressed.len() < original.len());
    }

    #[test]
    fn should_reject_level_above_nine() {
        // when
        let result = Level::new(10);

        // then
        assert_eq!(result, Err(Error::InvalidLevel(10)));
    }

    #[test]
    fn should_default_to_best_level() {
        assert_eq!(Level::default(), Level::BEST);
    }

    #[test]
    fn should_fail_decompressing_uncompressed_data() {
        // given - plain text, no zlib framing
        let raw = b"this was never compressed";

        // when
        let result = decompress(raw);

        // then
        assert!(matches!(result, Err(Error::Codec(_))));
    }

    #[test]
    fn should_fail_decompressing_truncated_data() {
        // given
        let compressed = compress(b"some payload worth truncating", Level::BEST).unwrap();
        let truncated = &compressed[..compressed.len() / 2];

        // when
        let result = decompress(truncated);

        // then
        assert!(matches!(result, Err(Error::Codec(_))));
    }
}
