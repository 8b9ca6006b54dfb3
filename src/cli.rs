//! CLI argument definitions.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::telemetry::Verbosity;

/// Top-level CLI parser for `nexus-uploader`.
#[derive(Debug, Parser)]
#[command(
    name = "nexus-uploader",
    version,
    about = "Easily upload multiple artifacts to a remote Nexus server."
)]
pub struct Cli {
    /// Local m2 repository directories to scan.
    #[arg(required = true, value_name = "REPODIRS")]
    pub repodirs: Vec<PathBuf>,

    /// Nexus server URL (e.g. http://localhost:8081).
    #[arg(long, value_name = "URL")]
    pub repo_url: String,

    /// Repository ID (in Nexus) to upload to.
    #[arg(long, value_name = "ID")]
    pub repo_id: String,

    /// Basic-auth credentials in the form username:password.
    #[arg(long, env = "NEXUS_AUTH", hide_env_values = true, value_name = "USER:PASSWORD")]
    pub auth: Option<String>,

    /// Regex to apply to artifactId.
    #[arg(long, visible_alias = "ia", value_name = "REGEX")]
    pub include_artifact: Option<String>,

    /// Regex to apply to groupId.
    #[arg(long, visible_alias = "ig", value_name = "REGEX")]
    pub include_group: Option<String>,

    /// Regex to apply to version.
    #[arg(long, visible_alias = "iv", value_name = "REGEX")]
    pub include_version: Option<String>,

    /// Upload to Nexus even if the artifact already exists.
    #[arg(short = 'F', long)]
    pub force_upload: bool,

    /// Only upload the latest N versions (by descriptor mtime) of each artifact.
    #[arg(short, long, value_name = "N")]
    pub limit: Option<NonZeroUsize>,

    /// Classifier to look for (repeatable; replaces the default list).
    #[arg(long = "classifier", value_name = "NAME")]
    pub classifiers: Vec<String>,

    /// File type a classifier file may have (repeatable; replaces `jar`, `exe`).
    #[arg(long = "type", value_name = "EXT")]
    pub types: Vec<String>,

    /// Scan and select only; print what would be uploaded.
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any artifact fails to upload.
    #[arg(long)]
    pub strict: bool,

    /// Log at debug level.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log warnings and errors only.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log level requested on the command line.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}
