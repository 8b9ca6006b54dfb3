//! Lazy discovery of artifact records in an on-disk m2 repository.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::{DirEntry, WalkDir};

use super::coordinate::Coordinate;
use super::record::ArtifactRecord;

/// Descriptor file suffix.
pub const DESCRIPTOR_EXTENSION: &str = "pom";

/// Naming conventions used to find the files that belong to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    /// Extension of the primary binary (`jar`).
    pub packaging: String,
    /// Classifier names to look for, e.g. `sources`, `javadoc`.
    pub classifiers: Vec<String>,
    /// File extensions a classifier file may carry, e.g. `jar`, `exe`.
    pub types: Vec<String>,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            packaging: "jar".to_string(),
            classifiers: ["sources", "javadoc", "no_aop", "noaop", "linux-x86_64", "osx-x86_64"]
                .map(String::from)
                .to_vec(),
            types: ["jar", "exe"].map(String::from).to_vec(),
        }
    }
}

/// Iterator over every descriptor below a repository root.
///
/// Directories are walked lazily in file-name order, so the whole tree is
/// never held in memory. Symbolic links are not followed. Call [`scan`] again
/// to restart from the beginning.
pub struct RepositoryScanner {
    root: PathBuf,
    layout: AssetLayout,
    walker: walkdir::IntoIter,
}

/// Starts a scan of `root`, yielding one [`ArtifactRecord`] per descriptor.
#[must_use]
pub fn scan(root: &Path, layout: &AssetLayout) -> RepositoryScanner {
    RepositoryScanner {
        root: root.to_path_buf(),
        layout: layout.clone(),
        walker: WalkDir::new(root).sort_by_file_name().into_iter(),
    }
}

impl RepositoryScanner {
    fn record_for(&self, entry: &DirEntry) -> Option<ArtifactRecord> {
        let path = entry.path();
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let coordinate = match Coordinate::from_relative_path(relative) {
            Ok(coordinate) => coordinate,
            Err(err) => {
                tracing::warn!(%err, "Skipping descriptor with unexpected layout");
                return None;
            }
        };
        if !coordinate.is_well_formed() {
            tracing::warn!(path = %relative.display(), %coordinate, "Descriptor sits directly below the root; groupId is empty");
        }

        let location = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let descriptor = entry.file_name().to_string_lossy().into_owned();
        let base = descriptor.strip_suffix(&format!(".{DESCRIPTOR_EXTENSION}")).unwrap_or(&descriptor);

        let primary_name = format!("{base}.{}", self.layout.packaging);
        let primary = location.join(&primary_name).is_file().then_some(primary_name);

        let mut classifiers = BTreeMap::new();
        for classifier in &self.layout.classifiers {
            let files: Vec<String> = self
                .layout
                .types
                .iter()
                .map(|file_type| format!("{base}-{classifier}.{file_type}"))
                .filter(|name| location.join(name).is_file())
                .inspect(|name| tracing::debug!(file = %location.join(name).display(), "Found classifier file"))
                .collect();
            if !files.is_empty() {
                classifiers.insert(classifier.clone(), files);
            }
        }

        let modified = match entry.metadata().map_err(std::io::Error::from).and_then(|m| m.modified()) {
            Ok(time) => DateTime::<Utc>::from(time),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Cannot read modification time; treating as oldest");
                DateTime::UNIX_EPOCH
            }
        };

        Some(ArtifactRecord { location, descriptor, coordinate, primary, classifiers, modified })
    }
}

impl Iterator for RepositoryScanner {
    type Item = ArtifactRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%err, "Skipping unreadable entry");
                    continue;
                }
            };
            if !is_descriptor(&entry) {
                continue;
            }
            if let Some(record) = self.record_for(&entry) {
                return Some(record);
            }
        }
    }
}

/// Only regular files count; a symlinked descriptor is skipped like any other
/// link, so its metadata is never confused with the target's.
fn is_descriptor(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&format!(".{DESCRIPTOR_EXTENSION}")))
}
