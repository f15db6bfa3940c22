//! Query bar renderer.
//!
//! A single `> query` line. While the list has focus the whole line gets the
//! focus background; while the query is being edited a block cursor follows
//! the text.

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::QueryBarInfo;

const PROMPT: &str = "> ";

/// Renders the query bar on `row` and returns the next row.
///
/// Queries wider than the line keep their tail visible, so the cursor end is
/// always on screen.
pub fn render_query_bar(out: &mut String, row: usize, bar: &QueryBarInfo, theme: &Theme, cols: usize) -> usize {
    let cursor_len = usize::from(bar.editing);
    let room = cols.saturating_sub(PROMPT.len() + cursor_len);
    let skip = bar.query.len().saturating_sub(room);
    let visible = bar.query.get(skip..).unwrap_or_default();

    position_cursor(out, row, 1);
    if !bar.editing {
        out.push_str(&Theme::bg(&theme.colors.query_focus_bg));
    }
    out.push_str(&Theme::fg(&theme.colors.prompt_fg));
    out.push_str(PROMPT);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(visible);

    if bar.editing {
        out.push_str(Theme::reverse());
        out.push(' ');
        out.push_str(Theme::reset());
    }

    pad(out, cols.saturating_sub(PROMPT.len() + visible.len() + cursor_len));
    out.push_str(Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_shows_cursor_after_text() {
        let theme = Theme::default();
        let mut out = String::new();
        let bar = QueryBarInfo { query: "vim".to_string(), editing: true };
        assert_eq!(render_query_bar(&mut out, 5, &bar, &theme, 20), 6);
        assert!(out.contains(&format!("vim{} ", Theme::reverse())));
        assert!(!out.contains(&Theme::bg(&theme.colors.query_focus_bg)));
    }

    #[test]
    fn list_focus_highlights_the_bar() {
        let theme = Theme::default();
        let mut out = String::new();
        let bar = QueryBarInfo { query: String::new(), editing: false };
        render_query_bar(&mut out, 5, &bar, &theme, 20);
        assert!(out.contains(&Theme::bg(&theme.colors.query_focus_bg)));
        assert!(!out.contains(Theme::reverse()));
    }

    #[test]
    fn long_query_keeps_its_tail() {
        let theme = Theme::default();
        let mut out = String::new();
        let bar = QueryBarInfo { query: "abcdefghij".to_string(), editing: true };
        render_query_bar(&mut out, 1, &bar, &theme, 8);
        assert!(out.contains("fghij"));
        assert!(!out.contains("efghij"));
    }
}
