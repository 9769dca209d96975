//! Output formatting for the ghcdev CLI.
//!
//! Status, warnings, and errors go to stderr; command results (version
//! lists, paths, option tables) are printed by the commands themselves on
//! stdout so they stay scriptable.

use crate::style::Style;
use ghcdev_core::error::{Error, Fix};
use std::io::{self, Write};

/// Verbosity level for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Verbose output
    Verbose,
}

/// Output handler for consistent CLI output.
#[derive(Debug, Clone)]
pub struct Output {
    verbosity: Verbosity,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output handler with default verbosity.
    pub fn new() -> Self {
        Self {
            verbosity: Verbosity::Normal,
        }
    }

    /// Create an output handler with specified verbosity.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Create an output handler from quiet/verbose flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        Self::with_verbosity(if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        })
    }

    /// Check if verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    /// Print a status message with a step title.
    pub fn status(&self, action: &str, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{:>12} {}", Style::bold(Style::success(action)), message);
        }
    }

    /// Print an info message.
    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        eprintln!("{}: {}", Style::warning("warning"), message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {}", Style::error("error"), message);
    }

    /// Print a structured error with its fixes.
    pub fn print_error(&self, error: &Error) {
        eprintln!();
        eprintln!("{}: {}", Style::error("error"), error);

        match error {
            Error::Prerequisites { failures } => {
                for failure in failures {
                    eprintln!(
                        "  {} {}: {}",
                        Style::error("✗"),
                        failure.probe,
                        failure.detail
                    );
                    for fix in &failure.fixes {
                        self.print_fix_indented(fix, 4);
                    }
                }
            }
            Error::ExternalTool {
                command,
                exit_code,
                stderr,
                ..
            } => {
                eprintln!("  {} {}", Style::dim("command:"), command);
                if let Some(code) = exit_code {
                    eprintln!("  {} {}", Style::dim("exit code:"), code);
                }
                let tail: Vec<_> = stderr.lines().rev().take(12).collect();
                for line in tail.into_iter().rev() {
                    eprintln!("  {} {}", Style::dim("|"), line);
                }
            }
            Error::Config { path: Some(p), .. } => {
                eprintln!("  {} {}", Style::dim("-->"), p.display());
            }
            Error::Io { path: Some(p), .. } => {
                eprintln!("  {} {}", Style::dim("-->"), p.display());
            }
            _ => {}
        }

        let fixes = error.fixes();
        if !fixes.is_empty() {
            eprintln!();
            for fix in fixes {
                self.print_fix(fix);
            }
        }
    }

    /// Print a fix suggestion.
    pub fn print_fix(&self, fix: &Fix) {
        if let Some(ref cmd) = fix.command {
            eprintln!("{}: Run `{}`", Style::info("fix"), Style::command(cmd));
            if fix.description != *cmd {
                eprintln!("      {}", Style::dim(&fix.description));
            }
        } else {
            eprintln!("{}: {}", Style::info("fix"), fix.description);
        }
    }

    fn print_fix_indented(&self, fix: &Fix, indent: usize) {
        let pad = " ".repeat(indent);
        if let Some(ref cmd) = fix.command {
            eprintln!("{}{} {}", pad, Style::dim("fix:"), Style::command(cmd));
        } else {
            eprintln!("{}{} {}", pad, Style::dim("fix:"), fix.description);
        }
    }

    /// Print a section header.
    pub fn header(&self, title: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!();
            eprintln!("{}", Style::bold(title));
        }
    }

    /// Flush stdout and stderr.
    pub fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}
