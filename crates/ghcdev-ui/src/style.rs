//! Styling utilities for terminal output.

use console::{StyledObject, style};

/// Style helper for consistent terminal output.
pub struct Style;

impl Style {
    /// Style text as an error (red).
    pub fn error<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).red().bold()
    }

    /// Style text as a warning (yellow).
    pub fn warning<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).yellow()
    }

    /// Style text as success (green).
    pub fn success<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).green()
    }

    /// Style text as info (cyan).
    pub fn info<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan()
    }

    /// Style text as a command hint (cyan, bold).
    pub fn command<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan().bold()
    }

    /// Style text as dim (for secondary info).
    pub fn dim<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).dim()
    }

    /// Style text as bold.
    pub fn bold<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).bold()
    }
}
