//! Composable UI component renderers.
//!
//! Each component draws one area of the screen into the frame buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar naming the package origin
//! - [`table`]: Package list (identity, short summary, scroll markers)
//! - [`query_bar`]: `> query` input line
//! - [`details`]: Metadata of the selected package, or a status message
//! - [`footer`]: Keybinding hints
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::AppState;
//! use xbps_browse::ui::components::render_layout;
//!
//! let state = AppState::with_records(vec![]);
//! let vm = state.compute_viewmodel(24, 80);
//! let mut frame = String::new();
//! render_layout(&mut frame, &vm, &state.theme, 80);
//! assert!(frame.contains("No Match"));
//! ```

mod details;
mod footer;
mod header;
mod query_bar;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use details::render_details;
use footer::render_footer;
use header::render_header;
use query_bar::render_query_bar;
use table::render_table_rows;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full screen.
///
/// Layout structure:
/// ```text
/// [Header]
/// [List rows       - layout.list_height]
/// [Query bar]
/// [Border]
/// [Detail pane     - layout.detail_height]
/// [Footer]
/// ```
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    let layout = vm.layout;

    render_header(out, 1, &vm.header, theme, cols);
    render_table_rows(
        out,
        layout.list_start(),
        layout.list_height,
        &vm.display_items,
        vm.identity_width,
        vm.scroll,
        theme,
        cols,
    );
    render_query_bar(out, layout.query_row(), &vm.query_bar, theme, cols);
    render_border(out, layout.separator_row(), &theme.colors.border, cols);
    render_details(out, layout.detail_start(), layout.detail_height, &vm.details, theme, cols);
    render_footer(out, layout.footer_row(), &vm.footer, theme, cols);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_spans_the_width() {
        let mut out = String::new();
        let next = render_border(&mut out, 5, "#45475a", 4);
        assert_eq!(next, 6);
        assert!(out.starts_with("\u{1b}[5;1H"));
        assert!(out.contains("────"));
        assert!(!out.contains("─────"));
    }
}
