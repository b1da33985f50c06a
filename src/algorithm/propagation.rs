//! Append-only propagation worklist drained by a cursor

use crate::io::configuration::WORKLIST_RESERVE;
use crate::raster::Direction;

/// One pending constraint update from a source cell toward a neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropEntry {
    /// Cell whose candidates constrain the destination
    pub src_cell: usize,
    /// Cell being filtered
    pub dst_cell: usize,
    /// Direction of travel from source to destination
    pub direction: Direction,
}

/// Append-only worklist for one propagation run
///
/// Entries are never removed; `take_next` advances a cursor instead. Pushes
/// that happen mid-run go through `push_pending`, which skips entries already
/// waiting in the unprocessed tail. That suppresses obviously redundant work
/// without changing the fixpoint.
pub struct Worklist {
    entries: Vec<PropEntry>,
    cursor: usize,
}

impl Worklist {
    /// Create a worklist with capacity reserved for `cell_cnt` cells
    ///
    /// The buffer grows on demand and is reused across runs.
    pub fn with_reserve(cell_cnt: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cell_cnt.saturating_mul(WORKLIST_RESERVE)),
            cursor: 0,
        }
    }

    /// Drop all entries and rewind the cursor
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Append an entry unconditionally
    pub fn push(&mut self, entry: PropEntry) {
        self.entries.push(entry);
    }

    /// Append an entry unless an identical one is already pending
    pub fn push_pending(&mut self, entry: PropEntry) {
        let pending = self.entries.get(self.cursor..).unwrap_or_default();
        if !pending.contains(&entry) {
            self.entries.push(entry);
        }
    }

    /// The next unprocessed entry, advancing the cursor
    pub fn take_next(&mut self) -> Option<PropEntry> {
        let entry = self.entries.get(self.cursor).copied();
        if entry.is_some() {
            self.cursor += 1;
        }
        entry
    }

    /// Total number of entries accumulated this run
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were accumulated
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
