//! Shared rendering utilities and helpers.
//!
//! Every helper appends to a frame `String` instead of printing, so a whole
//! screen is assembled first and written to the terminal in one go.
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::ui::helpers::{position_cursor, render_highlighted_text};
//! use xbps_browse::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut frame = String::new();
//! position_cursor(&mut frame, 3, 1);
//! render_highlighted_text(&mut frame, "libfoo-1.0_1", &[(3, 6)], &theme, false);
//! assert!(frame.starts_with("\u{1b}[3;1H"));
//! ```

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Appends `count` spaces.
pub fn pad(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

/// Cuts `text` to at most `width` characters, marking the cut with `...`.
///
/// ```rust
/// use xbps_browse::ui::helpers::truncate;
///
/// assert_eq!(truncate("firefox-esr-115.0_1", 10), "firefox...");
/// assert_eq!(truncate("zsh", 10), "zsh");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Splits `text` into lines of at most `width` characters at word
/// boundaries. Words longer than a line are broken.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                lines.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }
            let needed = if line_len == 0 { word.len() } else { word.len() + 1 };
            if line_len + needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }
        if line_len > 0 || paragraph.trim().is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Appends `text` with the given byte ranges highlighted as query matches.
///
/// Selected rows keep their selection colors instead. Ranges that do not
/// fall on character boundaries are ignored.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let mut current = 0;
    for &(start, end) in ranges {
        let end = end.min(text.len());
        if start < current
            || start >= end
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            continue;
        }

        out.push_str(&text[current..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.push_str(&text[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        current = end;
    }
    out.push_str(&text[current..]);
}
