//! Lazy record sources

use std::fmt;

use log::debug;

use crate::model::Record;

/// How the records behind a [`RecordSource`] are held.
enum Backing {
    /// Records still arriving from an iterator. `hint` is a trusted total
    /// count when the caller provided one.
    Streaming {
        iter: Box<dyn Iterator<Item = Record>>,
        hint: Option<usize>,
    },
    /// Every record is in the buffer; random access is free.
    Indexable,
}

/// A data source that materializes lazily.
///
/// Records pulled so far live in a buffer; a row id is the record's position
/// in that buffer, assigned in enumeration order and never reassigned. A
/// streaming source only advances when the table needs more rows, so cheap
/// initial renders never pay for the full collection. Operations that need
/// random access (sorting, select-all, programmatic selection) call
/// [`materialize`](RecordSource::materialize), which drains the remainder
/// exactly once.
pub struct RecordSource {
    rows: Vec<Record>,
    backing: Backing,
}

impl RecordSource {
    /// Creates a fully materialized source from a vector of records.
    pub fn from_records(rows: Vec<Record>) -> Self {
        Self {
            rows,
            backing: Backing::Indexable,
        }
    }

    /// Creates a streaming source with an unknown total count.
    ///
    /// The count becomes known when the iterator is exhausted.
    pub fn streaming<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: 'static,
    {
        Self {
            rows: Vec::new(),
            backing: Backing::Streaming {
                iter: Box::new(iter.into_iter()),
                hint: None,
            },
        }
    }

    /// Creates a streaming source with a trusted total count.
    pub fn streaming_with_len<I>(iter: I, len: usize) -> Self
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: 'static,
    {
        Self {
            rows: Vec::new(),
            backing: Backing::Streaming {
                iter: Box::new(iter.into_iter()),
                hint: Some(len),
            },
        }
    }

    /// Total record count, if known.
    ///
    /// Known for materialized sources and for streaming sources constructed
    /// with a trusted length; otherwise unknown until exhaustion.
    pub fn total(&self) -> Option<usize> {
        match &self.backing {
            Backing::Indexable => Some(self.rows.len()),
            Backing::Streaming { hint, .. } => *hint,
        }
    }

    /// Number of records pulled into the buffer so far.
    pub fn pulled(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` once every record is buffered.
    pub fn is_materialized(&self) -> bool {
        matches!(self.backing, Backing::Indexable)
    }

    /// The pulled prefix, in enumeration order.
    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the record for a row id.
    ///
    /// Panics when the id is past the pulled prefix; row ids handed out by
    /// the engine are always within it.
    pub fn get(&self, row: usize) -> &Record {
        &self.rows[row]
    }

    /// Pulls one record forward. Returns `false` at exhaustion, which also
    /// fixes the total count.
    pub fn pull(&mut self) -> bool {
        match &mut self.backing {
            Backing::Indexable => false,
            Backing::Streaming { iter, hint } => match iter.next() {
                Some(record) => {
                    self.rows.push(record);
                    true
                }
                None => {
                    if let Some(hint) = *hint
                        && hint != self.rows.len()
                    {
                        debug!(
                            "source length hint {hint} disagrees with actual {}",
                            self.rows.len()
                        );
                    }
                    self.backing = Backing::Indexable;
                    false
                }
            },
        }
    }

    /// Pulls until at least `n` records are buffered or the source runs dry.
    /// Returns the buffered count.
    pub fn pull_until(&mut self, n: usize) -> usize {
        while self.rows.len() < n && self.pull() {}
        self.rows.len()
    }

    /// Drains the remainder of a streaming source. Idempotent.
    pub fn materialize(&mut self) {
        if self.is_materialized() {
            return;
        }
        while self.pull() {}
        debug!("materialized source: {} rows", self.rows.len());
    }
}

impl fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backing = match &self.backing {
            Backing::Streaming { hint, .. } => format!("Streaming {{ hint: {hint:?} }}"),
            Backing::Indexable => "Indexable".to_string(),
        };
        f.debug_struct("RecordSource")
            .field("pulled", &self.rows.len())
            .field("backing", &backing)
            .finish()
    }
}

impl From<Vec<Record>> for RecordSource {
    fn from(rows: Vec<Record>) -> Self {
        Self::from_records(rows)
    }
}
