//! Terminal output for ghcdev.

pub mod output;
pub mod spinner;
pub mod style;

pub use output::{Output, Verbosity};
pub use spinner::Spinner;
pub use style::Style;
