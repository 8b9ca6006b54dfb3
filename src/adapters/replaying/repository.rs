//! Replaying adapter for the `ArtifactRepository` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::SubmitError;
use crate::ports::{ArtifactRepository, Existence, Submission};

/// Serves recorded existence checks and submission results from a cassette.
pub struct ReplayingRepository {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRepository {
    /// Creates a replaying repository from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ArtifactRepository for ReplayingRepository {
    fn check_exists(&self, asset_path: &str) -> Existence {
        let output = next_output(&self.replayer, "remote", "check_exists");
        serde_json::from_value(output).unwrap_or_else(|e| {
            Existence::Indeterminate(format!("unreadable recorded answer for {asset_path}: {e}"))
        })
    }

    fn submit(&self, _submission: &Submission) -> Result<(), SubmitError> {
        let output = next_output(&self.replayer, "remote", "submit");
        replay_result(output).map(|_| ()).map_err(SubmitError::Replayed)
    }
}
