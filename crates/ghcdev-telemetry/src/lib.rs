//! Structured logging setup for ghcdev.

use ghcdev_core::EnvVars;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Initialize the tracing subscriber.
///
/// Filtering comes from RUST_LOG when set, otherwise from the verbose flag.
/// `GHCDEV_LOG_JSON` switches to JSON output for debugging.
pub fn init(verbose: bool) {
    let default_directives = |level: &str| {
        [
            "ghcdev_core",
            "ghcdev_registry",
            "ghcdev_preflight",
            "ghcdev_toolchain",
            "ghcdev_cli",
        ]
        .map(|krate| format!("{krate}={level}"))
        .join(",")
    };

    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives("debug")))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives("warn")))
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    if std::env::var(EnvVars::GHCDEV_LOG_JSON).is_ok() {
        let json_layer = fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        subscriber.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .without_time();

        subscriber.with(fmt_layer).init();
    }
}
