//! Recording adapter for the `ArtifactRepository` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::error::SubmitError;
use crate::ports::{ArtifactRepository, Existence, Submission};

/// Records remote interactions while delegating to an inner implementation.
pub struct RecordingRepository {
    inner: Box<dyn ArtifactRepository>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRepository {
    /// Creates a recording repository wrapping the given implementation.
    pub fn new(inner: Box<dyn ArtifactRepository>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct AssetPathInput<'a> {
    asset_path: &'a str,
}

impl ArtifactRepository for RecordingRepository {
    fn check_exists(&self, asset_path: &str) -> Existence {
        let existence = self.inner.check_exists(asset_path);
        record_interaction(
            &self.recorder,
            "remote",
            "check_exists",
            &AssetPathInput { asset_path },
            &existence,
        );
        existence
    }

    fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        let result = self.inner.submit(submission);
        record_result(&self.recorder, "remote", "submit", submission, &result);
        result
    }
}
