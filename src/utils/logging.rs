//! Diagnostic logging on stderr.
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
//! default is `warn`, which still surfaces skipped rows and failed views.
//! Tables and prompts go to stdout and are never mixed with log lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";

pub fn init(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LEVEL)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
}
