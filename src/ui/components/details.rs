//! Detail pane renderer.
//!
//! Shows the selected package's metadata below the separator, or a message
//! when there is nothing to show (loading, failed fetch, no match).

use crate::ui::helpers::{pad, position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, Details, EmptyState};

/// Renders `height` rows of the detail pane starting at `row` and returns
/// the next row. Content that does not fit is cut off at the bottom.
pub fn render_details(out: &mut String, row: usize, height: usize, details: &Details, theme: &Theme, cols: usize) -> usize {
    let lines = match details {
        Details::Record(info) => record_lines(info, theme, cols),
        Details::Empty(empty) => empty_lines(empty, theme, cols),
    };

    let blank = String::new();
    for offset in 0..height {
        position_cursor(out, row + offset, 1);
        let (line, visible_len) = lines.get(offset).map_or((&blank, 0), |(l, n)| (l, *n));
        out.push_str(line);
        pad(out, cols.saturating_sub(visible_len));
        out.push_str(Theme::reset());
    }

    row + height
}

/// Styled line plus its visible width.
type Line = (String, usize);

fn title_line(theme: &Theme) -> Line {
    (format!("{} info{}", Theme::fg(&theme.colors.label_fg), Theme::reset()), 5)
}

fn record_lines(info: &DetailInfo, theme: &Theme, cols: usize) -> Vec<Line> {
    let mut lines = vec![title_line(theme)];

    for field in &info.fields {
        let label = format!(" {}: ", field.label);
        let value = truncate(&field.value, cols.saturating_sub(label.len()));
        let visible = label.len() + value.chars().count();
        lines.push((
            format!(
                "{}{label}{}{value}",
                Theme::fg(&theme.colors.label_fg),
                Theme::fg(&theme.colors.text_normal)
            ),
            visible,
        ));
    }

    if let Some(long) = &info.long_summary {
        lines.push((String::new(), 0));
        let width = cols.saturating_sub(2);
        for text in wrap(long, width) {
            let visible = 1 + text.chars().count();
            lines.push((format!("{} {text}", Theme::fg(&theme.colors.text_normal)), visible));
        }
    }

    lines
}

fn empty_lines(empty: &EmptyState, theme: &Theme, cols: usize) -> Vec<Line> {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };
    let message = truncate(&empty.message, cols.saturating_sub(1));
    let mut lines = vec![
        title_line(theme),
        (format!("{} {message}", Theme::fg(color)), 1 + message.chars().count()),
    ];

    if !empty.subtitle.is_empty() {
        let width = cols.saturating_sub(2);
        for text in wrap(&empty.subtitle, width) {
            let visible = 1 + text.chars().count();
            lines.push((
                format!("{}{} {text}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
                visible,
            ));
        }
    }

    lines
}
