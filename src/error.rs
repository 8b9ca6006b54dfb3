//! Error types.
//!
//! Configuration errors abort a run before any network activity. Submission
//! errors are local to one artifact and never abort the upload loop.

use std::path::PathBuf;

/// Problems with the run configuration, detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The server URL could not be parsed.
    #[error("invalid repository URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected URL text.
        url: String,
        /// Parse failure description.
        reason: String,
    },

    /// The server URL is not http(s).
    #[error("repository URL {0:?} must use http or https")]
    UnsupportedScheme(String),

    /// Credentials were not `user:password`.
    #[error("credentials must have the form username:password")]
    MalformedCredentials,

    /// An include pattern is not a valid regex.
    #[error("invalid --{flag} pattern: {source}")]
    InvalidPattern {
        /// Name of the flag carrying the pattern.
        flag: &'static str,
        /// Regex compile failure.
        source: regex::Error,
    },

    /// The target repository id is blank.
    #[error("repository id must not be empty")]
    EmptyRepositoryId,

    /// A repository root does not exist or is not a directory.
    #[error("repository root {} is not a directory", .0.display())]
    MissingRoot(PathBuf),
}

/// A descriptor path that does not follow the `<group>/<artifact>/<version>/` layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Fewer than three path segments below the root, so no artifact/version.
    #[error("descriptor {} is too shallow to carry a coordinate", .0.display())]
    TooShallow(PathBuf),

    /// A path segment is not valid UTF-8.
    #[error("descriptor path {} is not valid UTF-8", .0.display())]
    NonUtf8(PathBuf),
}

/// Failure to submit one artifact to the remote repository.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A staged file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Io {
        /// File that could not be staged.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Target URL.
        url: String,
        /// Underlying HTTP client failure.
        source: reqwest::Error,
    },

    /// The server answered with a status above 299.
    #[error("server rejected upload: url={url}, code={status}, msg={body}")]
    Rejected {
        /// Target URL.
        url: String,
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// A failure served from a cassette.
    #[error("{0}")]
    Replayed(String),
}

/// Failure reading or writing a cassette file.
#[derive(Debug, thiserror::Error)]
pub enum CassetteError {
    /// The cassette file could not be read.
    #[error("failed to read cassette file {}: {source}", path.display())]
    Read {
        /// Cassette path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The cassette file is not valid YAML.
    #[error("failed to parse cassette file {}: {source}", path.display())]
    Parse {
        /// Cassette path.
        path: PathBuf,
        /// YAML failure.
        source: serde_yaml::Error,
    },

    /// The cassette file could not be written.
    #[error("failed to write cassette file {}: {source}", path.display())]
    Write {
        /// Cassette path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The cassette could not be serialized.
    #[error("failed to serialize cassette: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Top-level error returned by [`crate::run`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Argument parsing failed, or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cassette I/O failed.
    #[error(transparent)]
    Cassette(#[from] CassetteError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// Some uploads failed and strict mode is on.
    #[error("{failed} artifact(s) failed to upload")]
    UploadsFailed {
        /// Number of artifacts whose submission failed.
        failed: usize,
    },
}
