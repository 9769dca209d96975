//! Core types shared across the ghcdev crates.
//!
//! This crate provides the error type, subprocess execution, and
//! environment variable handling used by every other ghcdev crate.

pub mod command;
pub mod env;
pub mod error;

pub use command::{CommandOutput, CommandRunner};
pub use env::EnvVars;
pub use error::{Error, Fix, ProbeFailure, Result};
