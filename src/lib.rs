//! zlibkv - A persistent, ordered key-value store with transparent zlib
//! compression.
//!
//! zlibkv stores opaque byte values keyed by text, compressing each value
//! with zlib before it reaches durable storage and decompressing it on the
//! way back out. Keys are ordered lexicographically, which makes full
//! iteration and half-open range scans meaningful.
//!
//! # Architecture
//!
//! The crate is a thin adapter over an embedded storage engine (sled):
//!
//! - **Codec** ([`codec`]): stateless zlib compress/decompress with a
//!   bounded compression [`Level`].
//! - **Record store** (`store`, internal): the durable table of
//!   `(key, compressed bytes)` rows with point lookup, upsert, delete,
//!   count, and ordered scans.
//! - **Façade** ([`ZlibKvDb`]): the public key-value API. Normalizes text
//!   values to bytes, runs everything through the codec, and translates
//!   storage conditions into [`Error`] values.
//! - **Session** ([`Session`]): a scoped guard that commits and closes the
//!   store when it goes out of scope; the façade is reusable across
//!   sessions.
//!
//! # Key Concepts
//!
//! - `get` returns `None` for a missing key; `fetch` fails with
//!   [`Error::KeyNotFound`]. The same asymmetry applies to `delete`
//!   (idempotent) and `remove` (fails when absent).
//! - [`keys`](ZlibKvDb::keys), [`values`](ZlibKvDb::values),
//!   [`items`](ZlibKvDb::items) and [`range`](ZlibKvDb::range) are lazy:
//!   rows stream from the storage scan and values are decompressed only as
//!   they are consumed. Every call starts a fresh cursor.
//! - Writes are buffered until [`commit`](ZlibKvDb::commit) or
//!   [`close`](ZlibKvDb::close); reads through the same handle observe them
//!   immediately.
//!
//! # Example
//!
//! ```no_run
//! use zlibkv::{Config, ZlibKvDb};
//!
//! # fn main() -> zlibkv::Result<()> {
//! let mut db = ZlibKvDb::open(Config::new("./data"))?;
//!
//! db.put("user:1", "alice")?;
//! db.put("user:2", b"bob")?;
//!
//! assert_eq!(db.get("user:1")?.as_deref(), Some(&b"alice"[..]));
//!
//! for entry in db.range("user:", "user;")? {
//!     let entry = entry?;
//!     println!("{} = {:?}", entry.key, entry.value);
//! }
//!
//! db.close()?;
//! # Ok(())
//! # }
//! ```

pub mod codec;

mod config;
mod db;
mod error;
mod iter;
mod model;
mod store;

pub use codec::Level;
pub use config::{Config, TextEncoding};
pub use db::{Session, ZlibKvDb};
pub use error::{Error, Result};
pub use iter::{Items, Keys, Values};
pub use model::{Entry, Value};

/// Opens or creates a store at `path` with default encoding and
/// compression level.
///
/// Convenience for `ZlibKvDb::open(Config::new(path))`.
pub fn open(path: impl Into<std::path::PathBuf>) -> Result<ZlibKvDb> {
    ZlibKvDb::open_path(path)
}
