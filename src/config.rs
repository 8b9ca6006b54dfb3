//! Immutable run configuration built from the command line.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Url;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::maven::AssetLayout;
use crate::select::IncludePatterns;

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password; may itself contain `:`.
    pub password: String,
}

impl FromStr for Credentials {
    type Err = ConfigError;

    /// Parses `username:password`, splitting at the first `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((username, password)) if !username.is_empty() => {
                Ok(Self { username: username.to_string(), password: password.to_string() })
            }
            _ => Err(ConfigError::MalformedCredentials),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and as whom to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Server base URL without a trailing slash, e.g. `http://localhost:8081`.
    pub base_url: String,
    /// Target repository id on the server.
    pub repository_id: String,
    /// Optional basic-auth credentials.
    pub credentials: Option<Credentials>,
}

impl RemoteConfig {
    /// Validates the server URL, repository id and credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unparsable or non-HTTP URL, a blank
    /// repository id, or malformed credentials.
    pub fn new(url: &str, repository_id: &str, auth: Option<&str>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl { url: url.to_string(), reason: e.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.to_string()));
        }
        let repository_id = repository_id.trim();
        if repository_id.is_empty() {
            return Err(ConfigError::EmptyRepositoryId);
        }
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            repository_id: repository_id.to_string(),
            credentials: auth.map(Credentials::from_str).transpose()?,
        })
    }

    /// Returns the components endpoint used for uploads.
    #[must_use]
    pub fn components_url(&self) -> String {
        format!("{}/service/rest/v1/components?repository={}", self.base_url, self.repository_id)
    }

    /// Returns the download URL of a file inside the target repository.
    #[must_use]
    pub fn asset_url(&self, asset_path: &str) -> String {
        format!("{}/repository/{}/{asset_path}", self.base_url, self.repository_id)
    }
}

/// Everything one upload run over one repository root needs.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Local m2 repository root.
    pub root: PathBuf,
    /// Target server.
    pub remote: RemoteConfig,
    /// Include patterns on group/artifact/version.
    pub patterns: IncludePatterns,
    /// Upload even files the server already has.
    pub force_upload: bool,
    /// File naming conventions for primary and classifier assets.
    pub layout: AssetLayout,
    /// Maximum number of versions per `groupId:artifactId`; `None` keeps all.
    pub limit: Option<NonZeroUsize>,
}

impl UploadConfig {
    /// Builds one configuration per positional repository root.
    ///
    /// Everything is validated up front so that no network activity happens
    /// for a run that would fail on its second root.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_cli(cli: &Cli) -> Result<Vec<Self>, ConfigError> {
        let remote = RemoteConfig::new(&cli.repo_url, &cli.repo_id, cli.auth.as_deref())?;
        let patterns = IncludePatterns::compile(
            cli.include_group.as_deref(),
            cli.include_artifact.as_deref(),
            cli.include_version.as_deref(),
        )?;

        let mut layout = AssetLayout::default();
        if !cli.classifiers.is_empty() {
            layout.classifiers.clone_from(&cli.classifiers);
        }
        if !cli.types.is_empty() {
            layout.types.clone_from(&cli.types);
        }

        cli.repodirs
            .iter()
            .map(|root| {
                if !root.is_dir() {
                    return Err(ConfigError::MissingRoot(root.clone()));
                }
                Ok(Self {
                    root: root.clone(),
                    remote: remote.clone(),
                    patterns: patterns.clone(),
                    force_upload: cli.force_upload,
                    layout: layout.clone(),
                    limit: cli.limit,
                })
            })
            .collect()
    }
}
