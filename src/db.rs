//! Core ZlibKvDb implementation: the key-value façade and session guard.

use std::path::PathBuf;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::codec::{self, Level};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::iter::{Items, Keys, Values};
use crate::model::Value;
use crate::store::RecordStore;

/// A persistent, ordered key-value store with transparent zlib compression.
///
/// `ZlibKvDb` composes the record store and the codec: values are
/// compressed before they are written and decompressed when they are read
/// back, byte-identically. Keys are text; iteration and range scans follow
/// ascending lexicographic key order.
///
/// # Lifecycle
///
/// A store is either open or closed. [`close`](ZlibKvDb::close) commits
/// buffered writes and releases the underlying connection; every operation
/// after that fails with [`Error::Closed`] until [`reopen`](ZlibKvDb::reopen).
/// The instance is reusable, not single-shot. For scoped use, see
/// [`session`](ZlibKvDb::session).
///
/// # Durability
///
/// Writes are buffered by the storage engine and observed immediately by
/// reads through the same handle. Durability across a crash is guaranteed
/// only after [`commit`](ZlibKvDb::commit) or [`close`](ZlibKvDb::close).
///
/// # Example
///
/// ```no_run
/// use zlibkv::{Config, ZlibKvDb};
///
/// # fn main() -> zlibkv::Result<()> {
/// let mut db = ZlibKvDb::open(Config::new("./data"))?;
///
/// db.put("greeting", "hello")?;
/// db.put("payload", b"world")?;
///
/// assert_eq!(db.get("greeting")?.as_deref(), Some(&b"hello"[..]));
/// assert!(db.contains("payload")?);
///
/// for entry in db.items()? {
///     let entry = entry?;
///     println!("{} = {:?}", entry.key, entry.value);
/// }
///
/// db.close()?;
/// # Ok(())
/// # }
/// ```
pub struct ZlibKvDb {
    config: Config,
    store: Option<RecordStore>,
}

impl ZlibKvDb {
    /// Opens or creates a store with the given configuration.
    pub fn open(config: Config) -> Result<Self> {
        let store = RecordStore::open(&config.path)?;
        debug!(path = %config.path.display(), "opened store");
        Ok(Self {
            config,
            store: Some(store),
        })
    }

    /// Opens or creates a store at `path` with default encoding and
    /// compression level.
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::new(path))
    }

    /// Returns the store, or [`Error::Closed`] if the handle was closed.
    fn store(&self) -> Result<&RecordStore> {
        self.store.as_ref().ok_or(Error::Closed)
    }

    /// Returns whether the handle is open.
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// Gets the decompressed value for a key, or `None` if absent.
    ///
    /// A missing key is not an error; use [`fetch`](ZlibKvDb::fetch) when
    /// absence should fail.
    pub fn get(&self, key: &str) -> Result<Option<Bytes>> {
        match self.store()?.lookup(key)? {
            Some(raw) => Ok(Some(codec::decompress(&raw)?)),
            None => Ok(None),
        }
    }

    /// Gets the decompressed value for a key that must exist.
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn fetch(&self, key: &str) -> Result<Bytes> {
        self.get(key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Puts a value, overwriting any existing value for the key.
    ///
    /// Accepts text (encoded with the configured
    /// [`TextEncoding`](crate::TextEncoding)) or raw bytes. The value is
    /// compressed at the store's default level before it is written.
    pub fn put(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.put_with_level(key, value, self.config.level)
    }

    /// Puts a value compressed at a specific level, overriding the default.
    pub fn put_with_level(&self, key: &str, value: impl Into<Value>, level: Level) -> Result<()> {
        let store = self.store()?;
        let raw = match value.into() {
            Value::Text(text) => self.config.encoding.encode(&text)?,
            Value::Bytes(bytes) => bytes,
        };
        let compressed = codec::compress(&raw, level)?;
        store.upsert(key, compressed)
    }

    /// Deletes a key. No-op if the key does not exist.
    ///
    /// This is the ensure-absent form; [`remove`](ZlibKvDb::remove) fails on
    /// a missing key instead.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.store()?.remove(key)?;
        Ok(())
    }

    /// Deletes a key that must exist.
    ///
    /// Checks for presence before deleting and returns
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn remove(&self, key: &str) -> Result<()> {
        let store = self.store()?;
        if !store.contains(key)? {
            return Err(Error::KeyNotFound(key.to_string()));
        }
        store.remove(key)?;
        Ok(())
    }

    /// Returns whether a key exists. Does not decompress the value.
    pub fn contains(&self, key: &str) -> Result<bool> {
        self.store()?.contains(key)
    }

    /// Returns the number of keys in the store.
    pub fn size(&self) -> Result<usize> {
        Ok(self.store()?.count())
    }

    /// Returns a lazy iterator over keys in ascending lexicographic order.
    ///
    /// Each call produces a fresh cursor.
    pub fn keys(&self) -> Result<Keys> {
        Ok(Keys::new(self.store()?.scan(None)))
    }

    /// Returns a lazy iterator over decompressed values in ascending key
    /// order. Each element is decompressed as it is consumed.
    pub fn values(&self) -> Result<Values> {
        Ok(Values::new(self.store()?.scan(None)))
    }

    /// Returns a lazy iterator over `(key, value)` entries in ascending key
    /// order, with the same laziness contract as
    /// [`values`](ZlibKvDb::values).
    pub fn items(&self) -> Result<Items> {
        Ok(Items::new(self.store()?.scan(None)))
    }

    /// Returns a lazy iterator over entries whose keys fall in the
    /// half-open interval `[start, end)`, ascending.
    pub fn range(&self, start: &str, end: &str) -> Result<Items> {
        Ok(Items::new(self.store()?.scan(Some((start, end)))))
    }

    /// Durably persists all buffered writes.
    pub fn commit(&self) -> Result<()> {
        self.store()?.flush()?;
        debug!("committed store");
        Ok(())
    }

    /// Commits buffered writes and releases the underlying connection.
    ///
    /// After closing, all operations fail with [`Error::Closed`] until
    /// [`reopen`](ZlibKvDb::reopen) is called.
    pub fn close(&mut self) -> Result<()> {
        let store = self.store.take().ok_or(Error::Closed)?;
        store.flush()?;
        debug!("closed store");
        Ok(())
    }

    /// Re-binds the underlying connection after a close. No-op if the
    /// handle is already open.
    pub fn reopen(&mut self) -> Result<()> {
        if self.store.is_none() {
            self.store = Some(RecordStore::open(&self.config.path)?);
            debug!(path = %self.config.path.display(), "reopened store");
        }
        Ok(())
    }

    /// Begins a scoped session, reopening the handle if it was closed.
    ///
    /// The returned guard dereferences to the store and commits and closes
    /// it when dropped. Call [`Session::end`] instead of relying on drop
    /// when the close error matters.
    pub fn session(&mut self) -> Result<Session<'_>> {
        self.reopen()?;
        Ok(Session {
            db: self,
            finished: false,
        })
    }

    /// Returns the configuration the store was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Iterating the store is equivalent to iterating [`keys`](ZlibKvDb::keys).
impl<'a> IntoIterator for &'a ZlibKvDb {
    type Item = Result<String>;
    type IntoIter = Keys;

    fn into_iter(self) -> Keys {
        match self.keys() {
            Ok(keys) => keys,
            Err(err) => Keys::failed(err),
        }
    }
}

/// Scoped guard over an open store.
///
/// Created by [`ZlibKvDb::session`]. Dereferences to [`ZlibKvDb`], so all
/// store operations are available on the guard. On drop the store is
/// committed and closed; the parent `ZlibKvDb` can be reused afterwards by
/// starting another session or calling [`ZlibKvDb::reopen`].
pub struct Session<'a> {
    db: &'a mut ZlibKvDb,
    finished: bool,
}

impl Session<'_> {
    /// Commits and closes the store, surfacing any error.
    pub fn end(mut self) -> Result<()> {
        self.finished = true;
        self.db.close()
    }
}

impl std::ops::Deref for Session<'_> {
    type Target = ZlibKvDb;

    fn deref(&self) -> &ZlibKvDb {
        self.db
    }
}

impl std::ops::DerefMut for Session<'_> {
    fn deref_mut(&mut self) -> &mut ZlibKvDb {
        self.db
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.finished && self.db.is_open() {
            if let Err(err) = self.db.close() {
                warn!(error = %err, "failed to close store at session end");
            }
        }
    }
}
