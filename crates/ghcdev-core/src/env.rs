//! Environment variable constants for ghcdev.
//!
//! Single source of truth for every environment variable ghcdev recognizes.

/// Environment variable names used by ghcdev.
pub struct EnvVars;

impl EnvVars {
    /// Registry root override (default: `~/.ghcdev`).
    pub const GHCDEV_HOME: &'static str = "GHCDEV_HOME";

    /// Enable verbose output.
    pub const GHCDEV_VERBOSE: &'static str = "GHCDEV_VERBOSE";

    /// Suppress output.
    pub const GHCDEV_QUIET: &'static str = "GHCDEV_QUIET";

    /// Disable colored output.
    pub const GHCDEV_NO_COLOR: &'static str = "GHCDEV_NO_COLOR";

    /// Enable JSON log output.
    pub const GHCDEV_LOG_JSON: &'static str = "GHCDEV_LOG_JSON";

    /// Standard NO_COLOR environment variable.
    pub const NO_COLOR: &'static str = "NO_COLOR";

    /// Standard CLICOLOR environment variable.
    pub const CLICOLOR: &'static str = "CLICOLOR";
}

/// Check if colors should be disabled based on environment.
pub fn no_color() -> bool {
    std::env::var(EnvVars::NO_COLOR).is_ok()
        || std::env::var(EnvVars::GHCDEV_NO_COLOR).is_ok()
        || std::env::var(EnvVars::CLICOLOR)
            .map(|v| v == "0")
            .unwrap_or(false)
}
