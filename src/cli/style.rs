//! Terminal styling helpers

use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Semantic styles for terminal output; plain text when stdout is not a tty
pub trait Stylize {
    /// Bold, for headings and key values
    fn emphasis(&self) -> String;
    /// Cyan, for counts and names
    fn accent(&self) -> String;
    /// Dimmed, for secondary information
    fn muted(&self) -> String;
    /// Green, for completed work
    fn success(&self) -> String;
    /// Yellow, for warnings
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan()).to_string()
    }

    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed()).to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}
