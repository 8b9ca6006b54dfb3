//! Command dispatch and handlers.

pub mod list;
pub mod upload;

use crate::cli::Cli;
use crate::config::UploadConfig;
use crate::context::ServiceContext;
use crate::error::Error;

/// Validate the command line and run the requested command over every root.
///
/// All roots are validated before the first one is processed. When
/// `NEXUS_UPLOADER_RECORD` is set to a file path, every remote interaction is
/// recorded to that cassette.
///
/// # Errors
///
/// Returns an error for invalid configuration, a client that cannot be
/// built, or (with `--strict`) when any artifact failed to upload.
pub fn dispatch(cli: &Cli) -> Result<(), Error> {
    let configs = UploadConfig::from_cli(cli)?;

    if cli.dry_run {
        for config in &configs {
            list::run(config);
        }
        return Ok(());
    }

    let Some(first) = configs.first() else { return Ok(()) };
    let ctx = ServiceContext::from_env(&first.remote)?;
    dispatch_with_context(&configs, &ctx, cli.strict)
}

/// Upload every root through the given context.
///
/// # Errors
///
/// Returns [`Error::UploadsFailed`] when `strict` is set and any artifact
/// failed.
pub fn dispatch_with_context(
    configs: &[UploadConfig],
    ctx: &ServiceContext,
    strict: bool,
) -> Result<(), Error> {
    let failed: usize = configs
        .iter()
        .map(|config| {
            let report = upload::run(config, ctx);
            print!("{}", report.render());
            report.failed()
        })
        .sum();

    if strict && failed > 0 {
        return Err(Error::UploadsFailed { failed });
    }
    Ok(())
}
