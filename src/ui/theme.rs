//! Theme management and ANSI escape sequence generation.
//!
//! Built-in themes are compiled in from `themes/*.toml`; custom themes are
//! loaded from a TOML file at startup.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `void`: Dark theme in Void Linux greens
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! prompt_fg = "#f5c2e7"
//! query_focus_bg = "#1e3a5f"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! label_fg = "#a6e3a1"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! scroll_hint_fg = "#7f849c"
//! ```
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::ui::theme::Theme;
//!
//! let theme = Theme::from_name("void").unwrap();
//! assert_eq!(format!("{}bold{}", Theme::bold(), Theme::reset()), "\u{1b}[1mbold\u{1b}[0m");
//! assert!(Theme::fg(&theme.colors.header_fg).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::{BrowseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected list row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer and package summaries.
    pub text_dim: String,

    /// Separator line between query bar and details.
    pub border: String,

    /// The `> ` query prefix.
    pub prompt_fg: String,
    /// Query bar background while the list has focus.
    pub query_focus_bg: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Detail pane labels (`Pkg:`, `Desc:`, ...).
    pub label_fg: String,

    /// Loading message.
    pub empty_state_fg: String,
    /// "No Match" and fetch failures.
    pub error_fg: String,

    /// `u` / `d` scroll markers.
    pub scroll_hint_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "void" => include_str!("../../themes/void.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::Io`] if the file cannot be read, and
    /// [`BrowseError::Theme`] if its content is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| BrowseError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB. Malformed colors become white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Reverse video, used for the query cursor.
    #[must_use]
    pub const fn reverse() -> &'static str {
        "\u{001b}[7m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_theme_parses() {
        for name in ["catppuccin-mocha", "catppuccin-latte", "void"] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_colors_become_escape_sequences() {
        assert_eq!(Theme::fg("#cdd6f4"), "\u{1b}[38;2;205;214;244m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
        assert_eq!(Theme::fg("#zzz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("#ééé"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trips_through_toml() {
        let theme = Theme::from_name("void").unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();
        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn bad_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"\n[colors]\nheader_fg = 1\n").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(BrowseError::Theme(_))));
    }

    #[test]
    fn missing_theme_file_is_an_io_error() {
        let err = Theme::from_file("/nonexistent/theme.toml").unwrap_err();
        assert!(matches!(err, BrowseError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
