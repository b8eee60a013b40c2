//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for route output.

use venuenav_lib::SummaryStyle;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for the total distance.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for route separators.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for the "path found" banner and the origin.
    pub const GREEN: &str = "\x1b[32m";
    /// Magenta for the destination.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Red for "no route" messages.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub magenta: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            magenta: colors::MAGENTA,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            magenta: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

impl SummaryStyle for ColorPalette {
    fn banner(&self, text: &str) -> String {
        format!("{}{text}{}", self.green, self.reset)
    }

    fn origin(&self, text: &str) -> String {
        format!("{}{text}{}", self.green, self.reset)
    }

    fn destination(&self, text: &str) -> String {
        format!("{}{text}{}", self.magenta, self.reset)
    }

    fn distance(&self, text: &str) -> String {
        format!("{}{text}{}", self.white_bold, self.reset)
    }

    fn separator(&self) -> String {
        format!(" {}→{} ", self.gray, self.reset)
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
