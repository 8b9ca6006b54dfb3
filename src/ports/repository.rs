//! Remote artifact repository port.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;
use crate::maven::Coordinate;

/// Answer to "is this file already on the server?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Existence {
    /// The server reported the file absent.
    Missing,
    /// The server reported the file present.
    Present,
    /// The server could not be asked or gave an unexpected answer.
    Indeterminate(String),
}

impl Existence {
    /// Only a confirmed absence warrants an upload; anything ambiguous is
    /// treated as already present.
    #[must_use]
    pub fn needs_upload(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One file included in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedAsset {
    /// Position in the request, starting at 1.
    pub number: usize,
    /// File name as uploaded.
    pub file_name: String,
    /// Local file to stream.
    #[serde(skip)]
    pub path: PathBuf,
    /// Extension taken from this file's own suffix.
    pub extension: String,
    /// Classifier, for classifier variants only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

/// The descriptor plus every asset chosen for one artifact version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Coordinate being published.
    pub coordinate: Coordinate,
    /// Staged files in request order; the descriptor is always first.
    pub assets: Vec<StagedAsset>,
}

impl Submission {
    /// Starts a submission whose first asset is the descriptor.
    #[must_use]
    pub fn new(coordinate: Coordinate, descriptor: &str, path: PathBuf) -> Self {
        let mut submission = Self { coordinate, assets: Vec::new() };
        submission.push(descriptor, path, None);
        submission
    }

    /// Appends an asset, numbering it after the last one.
    pub fn push(&mut self, file_name: &str, path: PathBuf, classifier: Option<&str>) {
        self.assets.push(StagedAsset {
            number: self.assets.len() + 1,
            file_name: file_name.to_string(),
            path,
            extension: extension_of(file_name).to_string(),
            classifier: classifier.map(str::to_string),
        });
    }

    /// Number of assets besides the descriptor.
    #[must_use]
    pub fn extra_assets(&self) -> usize {
        self.assets.len().saturating_sub(1)
    }
}

/// Returns the text after the final `.` of a file name.
#[must_use]
pub fn extension_of(file_name: &str) -> &str {
    file_name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// A server that can be asked about, and receive, maven artifacts.
///
/// Alternate wire protocols implement this trait without touching discovery
/// or selection.
pub trait ArtifactRepository: Send + Sync {
    /// Checks whether `asset_path` (`<group/path>/<artifact>/<version>/<file>`)
    /// already exists remotely.
    fn check_exists(&self, asset_path: &str) -> Existence;

    /// Publishes the submission as a single request.
    ///
    /// # Errors
    ///
    /// Returns an error if a staged file cannot be read, the request cannot be
    /// sent, or the server rejects it.
    fn submit(&self, submission: &Submission) -> Result<(), SubmitError>;
}
