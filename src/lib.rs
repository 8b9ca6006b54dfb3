//! Core library entry for the `nexus-uploader` CLI.
//!
//! A run has three stages: [`maven::scan`] discovers artifact versions in a
//! local m2 repository, [`select::select`] filters them and keeps the most
//! recent versions per artifact, and [`upload::Uploader`] sends whatever the
//! remote server is missing through an [`ports::ArtifactRepository`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod maven;
pub mod ports;
pub mod select;
pub mod telemetry;
pub mod upload;

use clap::Parser;

pub use error::Error;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails (including
/// `--help`/`--version`), and any configuration or run error otherwise.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    telemetry::init_tracing(cli.verbosity());
    commands::dispatch(&cli)
}
