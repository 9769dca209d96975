//! Error types for ghcdev.

use std::path::PathBuf;

/// Result type alias using the ghcdev Error.
pub type Result<T> = std::result::Result<T, Error>;

/// A fix suggestion attached to an error or probe failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    /// Description of what this fix does
    pub description: String,
    /// Command to run, if applicable
    pub command: Option<String>,
}

impl Fix {
    /// Create a fix with just a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: None,
        }
    }

    /// Create a fix with a command.
    pub fn with_command(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: Some(command.into()),
        }
    }
}

/// A single failed prerequisite probe.
///
/// Probes are aggregated before reporting so the user sees every missing
/// prerequisite at once instead of fixing one and failing on the next.
#[derive(Debug, Clone)]
pub struct ProbeFailure {
    /// Probe name ("gmp", "make", "bootstrap ghc", ...)
    pub probe: String,
    /// What was found (or not found)
    pub detail: String,
    /// Suggested fixes, keyed to the detected distribution where possible
    pub fixes: Vec<Fix>,
}

/// Structured error type for ghcdev.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("registry not initialized at {}", .root.display())]
    NotInitialized { root: PathBuf, fixes: Vec<Fix> },

    #[error("version {id} is not installed")]
    NotInstalled { id: String, fixes: Vec<Fix> },

    #[error("unknown option key: {key}")]
    UnknownOptionKey { key: String, fixes: Vec<Fix> },

    #[error("{} prerequisite check(s) failed", .failures.len())]
    Prerequisites { failures: Vec<ProbeFailure> },

    #[error("{stage} failed: {command}")]
    ExternalTool {
        stage: String,
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        fixes: Vec<Fix>,
    },

    #[error("required tool not found: {tool}")]
    ToolMissing {
        tool: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        fixes: Vec<Fix>,
    },

    #[error("{message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        fixes: Vec<Fix>,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Get suggested fixes for this error.
    pub fn fixes(&self) -> &[Fix] {
        match self {
            Error::NotInitialized { fixes, .. } => fixes,
            Error::NotInstalled { fixes, .. } => fixes,
            Error::UnknownOptionKey { fixes, .. } => fixes,
            Error::ExternalTool { fixes, .. } => fixes,
            Error::ToolMissing { fixes, .. } => fixes,
            Error::Config { fixes, .. } => fixes,
            Error::Prerequisites { .. } | Error::Io { .. } | Error::Other(_) => &[],
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            path: None,
            source: None,
            fixes: vec![],
        }
    }

    /// Create an I/O error with context.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: Some(path.into()),
            source,
        }
    }

    /// Create a NotInstalled error carrying the install command to run.
    pub fn not_installed(id: impl Into<String>) -> Self {
        let id = id.into();
        let install = format!("ghcdev install {id}");
        Error::NotInstalled {
            id,
            fixes: vec![Fix::with_command("Install this version first", install)],
        }
    }

    /// Create a NotInitialized error pointing at `ghcdev init`.
    pub fn not_initialized(root: impl Into<PathBuf>) -> Self {
        Error::NotInitialized {
            root: root.into(),
            fixes: vec![Fix::with_command("Initialize the registry", "ghcdev init")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_constructors() {
        let plain = Fix::new("do the thing");
        assert!(plain.command.is_none());

        let cmd = Fix::with_command("install it", "ghcdev install abc");
        assert_eq!(cmd.command.as_deref(), Some("ghcdev install abc"));
    }

    #[test]
    fn test_not_installed_names_install_command() {
        let err = Error::not_installed("abc123");
        assert_eq!(err.to_string(), "version abc123 is not installed");
        let fixes = err.fixes();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].command.as_deref(), Some("ghcdev install abc123"));
    }

    #[test]
    fn test_prerequisites_message_counts_failures() {
        let err = Error::Prerequisites {
            failures: vec![
                ProbeFailure {
                    probe: "gmp".into(),
                    detail: "libgmp not found".into(),
                    fixes: vec![],
                },
                ProbeFailure {
                    probe: "git".into(),
                    detail: "git not found".into(),
                    fixes: vec![],
                },
            ],
        };
        assert_eq!(err.to_string(), "2 prerequisite check(s) failed");
        assert!(err.fixes().is_empty());
    }
}
