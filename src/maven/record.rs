//! One discovered artifact version.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::coordinate::{ArtifactKey, Coordinate};

/// A single version of a single artifact found in a local repository.
///
/// Records are built during one scan, consumed by selection and upload, and
/// then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    /// Directory holding the descriptor and its assets.
    pub location: PathBuf,
    /// File name of the descriptor (`.pom`).
    pub descriptor: String,
    /// Coordinate derived from the directory layout.
    pub coordinate: Coordinate,
    /// File name of the primary binary, when present on disk.
    pub primary: Option<String>,
    /// Classifier name to the file names found for it, in discovery order.
    /// A classifier only appears when at least one file exists. Keys iterate
    /// alphabetically, which fixes the order classifier assets are staged in
    /// regardless of the order classifiers were configured.
    pub classifiers: BTreeMap<String, Vec<String>>,
    /// Modification time of the descriptor, used for recency ordering.
    pub modified: DateTime<Utc>,
}

impl ArtifactRecord {
    /// Returns the `groupId:artifactId` grouping key.
    #[must_use]
    pub fn key(&self) -> ArtifactKey {
        self.coordinate.key()
    }

    /// Returns the path of a file of this record inside the remote maven2 layout.
    #[must_use]
    pub fn remote_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.coordinate.repository_dir())
    }

    /// Returns the local path of one of this record's files.
    #[must_use]
    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.location.join(file_name)
    }
}
