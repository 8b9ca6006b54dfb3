//! Maven coordinates and artifact keys.

use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;

use crate::error::LayoutError;

/// The `(groupId, artifactId, version)` triple identifying one release.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Coordinate {
    /// Dot-separated group, e.g. `com.acme`. Empty for degenerate layouts.
    pub group_id: String,
    /// Artifact name, e.g. `widget`.
    pub artifact_id: String,
    /// Version directory name, e.g. `1.0`.
    pub version: String,
}

impl Coordinate {
    /// Derives a coordinate from a descriptor path relative to the repository root.
    ///
    /// The layout is `<groupPath>/<artifactId>/<version>/<descriptor>`: the
    /// segment directly above the descriptor is the version, the one above that
    /// the artifactId, and everything above that (joined with `.`) the groupId.
    /// A descriptor exactly three segments deep yields an empty groupId.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TooShallow`] when there are fewer than three
    /// segments, or [`LayoutError::NonUtf8`] for undecodable segments.
    pub fn from_relative_path(relative: &Path) -> Result<Self, LayoutError> {
        let mut segments = Vec::new();
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                let segment =
                    segment.to_str().ok_or_else(|| LayoutError::NonUtf8(relative.to_path_buf()))?;
                if !segment.is_empty() {
                    segments.push(segment);
                }
            }
        }
        // Drop the descriptor file name itself.
        segments.pop();

        let (Some(version), Some(artifact_id)) = (segments.pop(), segments.pop()) else {
            return Err(LayoutError::TooShallow(relative.to_path_buf()));
        };

        Ok(Self {
            group_id: segments.join("."),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        })
    }

    /// Returns the grouping key `groupId:artifactId`.
    #[must_use]
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey { group_id: self.group_id.clone(), artifact_id: self.artifact_id.clone() }
    }

    /// Returns `<group/path>/<artifactId>/<version>`, the directory of this
    /// release inside a maven2 repository.
    #[must_use]
    pub fn repository_dir(&self) -> String {
        format!("{}/{}/{}", self.group_id.replace('.', "/"), self.artifact_id, self.version)
    }

    /// Returns `false` for the degenerate layout with an empty groupId.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.group_id.is_empty()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Grouping key for version-limited selection: `groupId:artifactId`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactKey {
    /// Group of the artifact.
    pub group_id: String,
    /// Artifact name.
    pub artifact_id: String,
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}
