//! Tracing subscriber initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log level when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Progress at info level.
    Normal,
    /// Every existence check and discovered file.
    Verbose,
}

impl Verbosity {
    fn default_directive(self) -> &'static str {
        match self {
            Self::Quiet => "nexus_uploader=warn",
            Self::Normal => "nexus_uploader=info",
            Self::Verbose => "nexus_uploader=debug",
        }
    }
}

/// Installs a stdout fmt subscriber filtered by `RUST_LOG`, falling back to
/// `verbosity`. Later calls are no-ops, so tests may call this freely.
pub fn init_tracing(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout).with_target(false))
        .try_init();
}
