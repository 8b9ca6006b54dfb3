//! Service context bundling the remote port trait object.

use std::env;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::Nexus3Repository;
use crate::adapters::recording::RecordingRepository;
use crate::adapters::replaying::ReplayingRepository;
use crate::cassette::{Cassette, CassetteRecorder, CassetteReplayer};
use crate::config::RemoteConfig;
use crate::error::Error;
use crate::ports::ArtifactRepository;

/// Environment variable naming a cassette file to record a live run into.
pub const RECORD_ENV: &str = "NEXUS_UPLOADER_RECORD";

/// Bundles the external boundary used by an upload run.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying).
pub struct ServiceContext {
    /// Remote repository the orchestrator talks to.
    pub remote: Box<dyn ArtifactRepository>,
    /// Cassette recorder; written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context talking to the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(remote: &RemoteConfig) -> Result<Self, Error> {
        let repository = Nexus3Repository::new(remote.clone()).map_err(Error::Client)?;
        Ok(Self { remote: Box::new(repository), recorder: None })
    }

    /// Creates a live context whose remote interactions are recorded to
    /// `path` when the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn recording(remote: &RemoteConfig, path: &Path) -> Result<Self, Error> {
        let live = Nexus3Repository::new(remote.clone()).map_err(Error::Client)?;
        let target = format!("{}/repository/{}", remote.base_url, remote.repository_id);
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "nexus-uploader", target)));
        Ok(Self {
            remote: Box::new(RecordingRepository::new(Box::new(live), Arc::clone(&recorder))),
            recorder: Some(recorder),
        })
    }

    /// Creates a context whose remote is served from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, Error> {
        let cassette = Cassette::load(path)?;
        Ok(Self {
            remote: Box::new(ReplayingRepository::new(CassetteReplayer::new(&cassette))),
            recorder: None,
        })
    }

    /// Creates a context around an arbitrary repository implementation.
    #[must_use]
    pub fn with_remote(remote: Box<dyn ArtifactRepository>) -> Self {
        Self { remote, recorder: None }
    }

    /// Live context, recording when `NEXUS_UPLOADER_RECORD` names a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env(remote: &RemoteConfig) -> Result<Self, Error> {
        match env::var_os(RECORD_ENV) {
            Some(path) if !path.is_empty() => Self::recording(remote, Path::new(&path)),
            _ => Self::live(remote),
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else { return };
        let guard = match recorder.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.save() {
            Ok(path) => tracing::info!(path = %path.display(), interactions = guard.len(), "Recording saved"),
            Err(e) => tracing::warn!("failed to write cassette: {e}"),
        }
    }
}
