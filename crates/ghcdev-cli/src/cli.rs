//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use ghcdev_core::EnvVars;

use crate::styles::STYLES;

/// ghcdev - manage from-source GHC builds by git reference
#[derive(Parser, Debug)]
#[command(name = "ghcdev")]
#[command(author, version, about = "Manage from-source GHC builds by git reference")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(styles = STYLES)]
#[command(after_help = "Use `ghcdev help <command>` for more information about a command.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true, env = EnvVars::GHCDEV_VERBOSE)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, env = EnvVars::GHCDEV_QUIET)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = EnvVars::GHCDEV_NO_COLOR)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the registry (idempotent)
    Init,

    /// Build and install GHC at a git reference
    Install {
        /// Commit hash or tag to install
        reference: String,

        /// Skip the prerequisite checks
        #[arg(long)]
        skip_checks: bool,
    },

    /// Select an installed build as the active one
    Select {
        /// Commit hash of an installed build
        reference: String,
    },

    /// Print the path to an installed build's ghc executable
    Path {
        /// Commit hash of an installed build
        reference: String,
    },

    /// List installed builds
    #[command(visible_alias = "show")]
    List,

    /// Show the currently selected build
    Current,

    /// Refresh tag labels from the upstream repository
    UpdateTags,

    /// Set a build option
    SetOption {
        /// Option key (make-cmd, gmp-dir, repo-url)
        key: String,

        /// Option value
        value: String,
    },

    /// Show all build options
    ShowOptions,

    /// Check the environment for build prerequisites
    Doctor,
}
