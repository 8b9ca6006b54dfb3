//! Filtering and version-limited selection of discovered records.

mod filter;
mod limit;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

pub use filter::IncludePatterns;
pub use limit::RecentVersions;

use crate::maven::{ArtifactKey, ArtifactRecord};

/// Records chosen for upload, grouped by `groupId:artifactId`.
///
/// Groups iterate in key order. Within a limited group, records are ordered
/// newest first; unlimited groups keep discovery order.
#[derive(Debug, Default)]
pub struct Selection {
    /// Retained records per artifact key.
    pub groups: BTreeMap<ArtifactKey, Vec<ArtifactRecord>>,
    /// Records rejected by an include pattern.
    pub filtered_out: usize,
    /// Records dropped because their key already held `limit` newer versions.
    pub discarded: usize,
}

impl Selection {
    /// Total number of retained records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Iterates retained records, one key's members together.
    pub fn records(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.groups.values().flatten()
    }
}

enum Bucket {
    All(Vec<ArtifactRecord>),
    Recent(RecentVersions),
}

impl Bucket {
    fn new(limit: Option<NonZeroUsize>) -> Self {
        limit.map_or_else(|| Self::All(Vec::new()), |n| Self::Recent(RecentVersions::new(n)))
    }

    fn into_records(self) -> Vec<ArtifactRecord> {
        match self {
            Self::All(records) => records,
            Self::Recent(buffer) => buffer.into_newest_first(),
        }
    }
}

/// Filters `records` by `patterns` and keeps at most `limit` of the most
/// recently modified versions per artifact key.
///
/// Runs in `O(n log limit)`; only the retained records are buffered.
pub fn select<I>(records: I, patterns: &IncludePatterns, limit: Option<NonZeroUsize>) -> Selection
where
    I: IntoIterator<Item = ArtifactRecord>,
{
    let mut buckets: BTreeMap<ArtifactKey, Bucket> = BTreeMap::new();
    let mut filtered_out = 0;
    let mut discarded = 0;

    for (seq, record) in (0u64..).zip(records) {
        if !patterns.matches(&record.coordinate) {
            tracing::debug!(coordinate = %record.coordinate, "Excluded by include pattern");
            filtered_out += 1;
            continue;
        }
        match buckets.entry(record.key()).or_insert_with(|| Bucket::new(limit)) {
            Bucket::All(records) => records.push(record),
            Bucket::Recent(buffer) => {
                if let Some(dropped) = buffer.offer(record, seq) {
                    tracing::info!(coordinate = %dropped.coordinate, "Discard due to version limit");
                    discarded += 1;
                }
            }
        }
    }

    let groups = buckets.into_iter().map(|(key, bucket)| (key, bucket.into_records())).collect();
    Selection { groups, filtered_out, discarded }
}
