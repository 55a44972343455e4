//! Record store adapter over the sled engine.
//!
//! This module provides [`RecordStore`], the durable table of
//! `(key: text, value: opaque bytes)` rows behind the façade. sled supplies
//! the ordering and durability model the adapter relies on: keys are ordered
//! lexicographically by their bytes, single-key operations are atomic, and
//! writes are buffered in memory until [`RecordStore::flush`] persists them.

use std::path::Path;

use bytes::Bytes;

use crate::error::{Error, Result};

/// Durable, ordered storage of opaque key-value rows.
pub(crate) struct RecordStore {
    db: sled::Db,
}

impl RecordStore {
    /// Opens or creates the store at `path`.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Point read. Absent key yields `None`, not an error.
    pub(crate) fn lookup(&self, key: &str) -> Result<Option<Bytes>> {
        let row = self.db.get(key)?;
        Ok(row.map(|v| Bytes::copy_from_slice(&v)))
    }

    /// Insert-or-replace.
    pub(crate) fn upsert(&self, key: &str, value: Bytes) -> Result<()> {
        self.db.insert(key, value.as_ref())?;
        Ok(())
    }

    /// Deletes the row if present. Returns whether a row existed; the
    /// façade decides whether absence is an error.
    pub(crate) fn remove(&self, key: &str) -> Result<bool> {
        let previous = self.db.remove(key)?;
        Ok(previous.is_some())
    }

    /// Existence check without reading the value.
    pub(crate) fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.contains_key(key)?)
    }

    /// Number of rows.
    pub(crate) fn count(&self) -> usize {
        self.db.len()
    }

    /// Lazy ascending scan over `(key, bytes)` rows.
    ///
    /// Scans the whole store when `range` is `None`, otherwise only keys in
    /// the half-open interval `[start, end)`. Each call produces a fresh
    /// cursor.
    pub(crate) fn scan(&self, range: Option<(&str, &str)>) -> RecordScan {
        let inner = match range {
            Some((start, end)) => self.db.range(start..end),
            None => self.db.iter(),
        };
        RecordScan { inner }
    }

    /// Durably persists all buffered writes.
    pub(crate) fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

/// Lazy cursor over store rows in ascending key order.
pub(crate) struct RecordScan {
    inner: sled::Iter,
}

impl Iterator for RecordScan {
    type Item = Result<(String, Bytes)>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.inner.next()?;
        Some(row.map_err(Error::from).and_then(|(key, value)| {
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| Error::Encoding(format!("non-UTF-8 key in store: {}", e)))?;
            Ok((key, Bytes::copy_from_slice(&value)))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn should_upsert_and_lookup_row() {
        // given
        let (_dir, store) = test_store();

        // when
        store.upsert("key", Bytes::from_static(b"raw")).unwrap();
        let result = store.lookup("key").unwrap();

        // then
        assert_eq!(result, Some(Bytes::from_static(b"raw")));
    }

    #[test]
    fn should_return_none_for_missing_row() {
        // given
        let (_dir, store) = test_store();

        // when
        let result = store.lookup("missing").unwrap();

        // then
        assert!(result.is_none());
    }

    #[test]
    fn should_replace_row_on_upsert() {
        // given
        let (_dir, store) = test_store();
        store.upsert("key", Bytes::from_static(b"old")).unwrap();

        // when
        store.upsert("key", Bytes::from_static(b"new")).unwrap();

        // then
        assert_eq!(store.lookup("key").unwrap(), Some(Bytes::from_static(b"new")));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn should_report_whether_remove_found_a_row() {
        // given
        let (_dir, store) = test_store();
        store.upsert("key", Bytes::from_static(b"v")).unwrap();

        // when / then
        assert!(store.remove("key").unwrap());
        assert!(!store.remove("key").unwrap());
    }

    #[test]
    fn should_check_existence_without_value() {
        // given
        let (_dir, store) = test_store();
        store.upsert("present", Bytes::from_static(b"v")).unwrap();

        // then
        assert!(store.contains("present").unwrap());
        assert!(!store.contains("absent").unwrap());
    }

    #[test]
    fn should_scan_rows_in_ascending_key_order() {
        // given - inserted out of order
        let (_dir, store) = test_store();
        for key in ["b", "c", "a"] {
            store.upsert(key, Bytes::from_static(b"v")).unwrap();
        }

        // when
        let keys: Vec<String> = store
            .scan(None)
            .map(|row| row.unwrap().0)
            .collect();

        // then
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn should_scan_half_open_range() {
        // given
        let (_dir, store) = test_store();
        for key in ["a", "b", "c", "d"] {
            store.upsert(key, Bytes::from_static(b"v")).unwrap();
        }

        // when - [b, d) excludes both a and d
        let keys: Vec<String> = store
            .scan(Some(("b", "d")))
            .map(|row| row.unwrap().0)
            .collect();

        // then
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn should_produce_fresh_cursor_per_scan() {
        // given
        let (_dir, store) = test_store();
        store.upsert("key", Bytes::from_static(b"v")).unwrap();

        // when - first scan is fully drained
        let first: Vec<_> = store.scan(None).collect();
        let second: Vec<_> = store.scan(None).collect();

        // then
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn should_persist_flushed_rows_across_reopen() {
        // given
        let dir = tempfile::tempdir().unwrap();
        {
            let store = RecordStore::open(dir.path()).unwrap();
            store.upsert("key", Bytes::from_static(b"durable")).unwrap();
            store.flush().unwrap();
        }

        // when
        let reopened = RecordStore::open(dir.path()).unwrap();

        // then
        assert_eq!(
            reopened.lookup("key").unwrap(),
            Some(Bytes::from_static(b"durable"))
        );
    }
}
