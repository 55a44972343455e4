//! Lazy iterators over store contents.
//!
//! [`Keys`], [`Values`] and [`Items`] wrap a live cursor over the record
//! store scan and surface rows in ascending lexicographic key order. Values
//! are decompressed one element at a time as the iterator is consumed, so
//! early termination never pays the decompression cost of unvisited rows.
//! Every call to the corresponding façade method produces a fresh cursor.

use bytes::Bytes;

use crate::codec;
use crate::error::{Error, Result};
use crate::model::Entry;
use crate::store::RecordScan;

/// State shared by the iterator types: either a live cursor, or a single
/// pending error to surface before ending iteration.
enum ScanState {
    Live(RecordScan),
    Failed(Error),
    Done,
}

impl ScanState {
    fn next_row(&mut self) -> Option<Result<(String, Bytes)>> {
        match self {
            ScanState::Live(scan) => scan.next(),
            ScanState::Failed(_) => {
                let state = std::mem::replace(self, ScanState::Done);
                match state {
                    ScanState::Failed(err) => Some(Err(err)),
                    _ => unreachable!(),
                }
            }
            ScanState::Done => None,
        }
    }
}

/// Iterator over keys in ascending lexicographic order.
pub struct Keys {
    state: ScanState,
}

impl Keys {
    pub(crate) fn new(scan: RecordScan) -> Self {
        Self {
            state: ScanState::Live(scan),
        }
    }

    /// An iterator that yields `err` once, then ends. Used when iterating a
    /// façade whose handle is closed.
    pub(crate) fn failed(err: Error) -> Self {
        Self {
            state: ScanState::Failed(err),
        }
    }
}

impl Iterator for Keys {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.state.next_row()?;
        Some(row.map(|(key, _)| key))
    }
}

/// Iterator over decompressed values in ascending key order.
pub struct Values {
    state: ScanState,
}

impl Values {
    pub(crate) fn new(scan: RecordScan) -> Self {
        Self {
            state: ScanState::Live(scan),
        }
    }
}

impl Iterator for Values {
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.state.next_row()?;
        Some(row.and_then(|(_, raw)| codec::decompress(&raw)))
    }
}

/// Iterator over `(key, decompressed value)` entries in ascending key order.
pub struct Items {
    state: ScanState,
}

impl Items {
    pub(crate) fn new(scan: RecordScan) -> Self {
        Self {
            state: ScanState::Live(scan),
        }
    }
}

impl Iterator for Items {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.state.next_row()?;
        Some(row.and_then(|(key, raw)| {
            let value = codec::decompress(&raw)?;
            Ok(Entry { key, value })
        }))
    }
}
