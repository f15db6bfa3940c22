//! Package list renderer.
//!
//! Draws the visible window of the filtered view as two columns, identity
//! and short summary, with the last terminal column reserved for the scroll
//! markers: `u` on the top row when rows exist above the window, `d` on the
//! bottom row when rows exist below.

use crate::ui::helpers::{self, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ScrollHints};

/// Renders `height` list rows starting at `row` and returns the next row.
///
/// Rows past the end of `items` are cleared.
#[allow(clippy::too_many_arguments)]
pub fn render_table_rows(
    out: &mut String,
    row: usize,
    height: usize,
    items: &[DisplayItem],
    identity_width: usize,
    scroll: ScrollHints,
    theme: &Theme,
    cols: usize,
) -> usize {
    let content_width = cols.saturating_sub(1);

    for offset in 0..height {
        position_cursor(out, row + offset, 1);
        match items.get(offset) {
            Some(item) => render_table_row(out, item, identity_width, theme, content_width),
            None => pad(out, content_width),
        }

        let hint = if scroll.below && offset + 1 == height {
            Some('d')
        } else if scroll.above && offset == 0 {
            Some('u')
        } else {
            None
        };
        match hint {
            Some(marker) => {
                out.push_str(&Theme::fg(&theme.colors.scroll_hint_fg));
                out.push(marker);
                out.push_str(Theme::reset());
            }
            None if cols > 0 => out.push(' '),
            None => {}
        }
    }

    row + height
}

/// Renders one row, padded to `width` characters.
///
/// # Layout
///
/// ```text
/// [1 space] IDENTITY (padded to identity_width) [1 space] summary [padding]
/// ```
///
/// # Styling Precedence
///
/// 1. Selection colors for the whole row (if `is_selected`)
/// 2. Match highlights inside the identity
/// 3. Normal identity color, dimmed summary
fn render_table_row(out: &mut String, item: &DisplayItem, identity_width: usize, theme: &Theme, width: usize) {
    if item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    out.push(' ');
    helpers::render_highlighted_text(
        out,
        &item.identity,
        &item.highlight_ranges,
        theme,
        item.is_selected,
    );
    let identity_len = item.identity.chars().count();
    pad(out, identity_width.saturating_sub(identity_len) + 1);

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(&item.summary);

    let used = 1 + identity_len.max(identity_width) + 1 + item.summary.chars().count();
    pad(out, width.saturating_sub(used));
    out.push_str(Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(identity: &str, is_selected: bool) -> DisplayItem {
        DisplayItem {
            identity: identity.to_string(),
            summary: "summary".to_string(),
            is_selected,
            highlight_ranges: vec![],
        }
    }

    #[test]
    fn scroll_markers_sit_in_last_column() {
        let theme = Theme::default();
        let mut out = String::new();
        let items = [item("a-1", false), item("b-1", false)];
        let scroll = ScrollHints { above: true, below: true };
        let next = render_table_rows(&mut out, 2, 2, &items, 12, scroll, &theme, 40);
        assert_eq!(next, 4);

        let marker = |c: char| format!("{}{c}{}", Theme::fg(&theme.colors.scroll_hint_fg), Theme::reset());
        let first_row_end = out.find("\u{1b}[3;1H").unwrap();
        assert!(out[..first_row_end].ends_with(&marker('u')));
        assert!(out.ends_with(&marker('d')));
    }

    #[test]
    fn selected_row_uses_selection_colors() {
        let theme = Theme::default();
        let mut out = String::new();
        let items = [item("a-1", true)];
        render_table_rows(&mut out, 2, 1, &items, 12, ScrollHints::default(), &theme, 40);
        assert!(out.contains(&Theme::bg(&theme.colors.selection_bg)));
    }

    #[test]
    fn missing_rows_are_cleared() {
        let theme = Theme::default();
        let mut out = String::new();
        render_table_rows(&mut out, 2, 3, &[], 12, ScrollHints::default(), &theme, 10);
        assert!(out.contains("\u{1b}[4;1H"));
        assert!(!out.contains('u') && !out.contains('d'));
    }
}
