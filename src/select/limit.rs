//! Bounded "most recent N" buffer for one artifact key.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};

use crate::maven::ArtifactRecord;

/// Heap entry ranked by descriptor modification time.
///
/// Among equal times the record offered later ranks lower, so on exact ties
/// the earlier-discovered record is the one kept.
struct Ranked {
    modified: DateTime<Utc>,
    seq: u64,
    record: ArtifactRecord,
}

impl Ranked {
    fn rank(&self) -> (DateTime<Utc>, Reverse<u64>) {
        (self.modified, Reverse(self.seq))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Keeps at most `capacity` records, preferring the most recently modified.
///
/// Backed by a min-heap on modification time so each offer costs
/// `O(log capacity)`.
pub struct RecentVersions {
    capacity: NonZeroUsize,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl RecentVersions {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity, heap: BinaryHeap::with_capacity(capacity.get()) }
    }

    /// Offers a record; `seq` is its discovery position.
    ///
    /// Returns the record that did not make the cut, if any: either the
    /// evicted oldest member or the candidate itself. A full buffer only
    /// accepts a candidate strictly newer than its current oldest member.
    pub fn offer(&mut self, record: ArtifactRecord, seq: u64) -> Option<ArtifactRecord> {
        let candidate = Ranked { modified: record.modified, seq, record };
        if self.heap.len() < self.capacity.get() {
            self.heap.push(Reverse(candidate));
            return None;
        }
        let newer = self
            .heap
            .peek()
            .is_some_and(|Reverse(oldest)| candidate.modified > oldest.modified);
        if !newer {
            return Some(candidate.record);
        }
        let evicted = self.heap.pop().map(|Reverse(ranked)| ranked.record);
        self.heap.push(Reverse(candidate));
        evicted
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` when nothing has been kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the buffer, returning records newest first.
    #[must_use]
    pub fn into_newest_first(self) -> Vec<ArtifactRecord> {
        self.heap.into_sorted_vec().into_iter().map(|Reverse(ranked)| ranked.record).collect()
    }
}
