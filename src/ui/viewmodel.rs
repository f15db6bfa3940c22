//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They contain no business logic, only display-ready data:
//! truncated text, highlight ranges, selection marks and the screen layout.
//!
//! # Layout
//!
//! ```text
//! row 1              header
//! rows 2..           package list      (half of the body)
//! next row           query bar         "> query"
//! next row           separator
//! next rows          detail pane       (rest of the body)
//! last row           footer
//! ```

/// Rows taken by the header, query bar, separator and footer.
pub const CHROME_ROWS: usize = 4;

/// Heights of the two variable panes for a given terminal height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub list_height: usize,
    pub detail_height: usize,
}

impl Layout {
    /// Splits the body between list and details. The list always gets at
    /// least one row.
    ///
    /// ```rust
    /// use xbps_browse::ui::viewmodel::Layout;
    ///
    /// let layout = Layout::for_rows(24);
    /// assert_eq!(layout.list_height, 10);
    /// assert_eq!(layout.detail_height, 10);
    /// assert_eq!(Layout::for_rows(2).list_height, 1);
    /// ```
    #[must_use]
    pub const fn for_rows(rows: usize) -> Self {
        let body = rows.saturating_sub(CHROME_ROWS);
        let half = body / 2;
        let list_height = if half == 0 { 1 } else { half };
        Self {
            list_height,
            detail_height: body.saturating_sub(list_height),
        }
    }

    #[must_use]
    pub const fn list_start(&self) -> usize {
        2
    }

    #[must_use]
    pub const fn query_row(&self) -> usize {
        self.list_start() + self.list_height
    }

    #[must_use]
    pub const fn separator_row(&self) -> usize {
        self.query_row() + 1
    }

    #[must_use]
    pub const fn detail_start(&self) -> usize {
        self.separator_row() + 1
    }

    #[must_use]
    pub const fn footer_row(&self) -> usize {
        self.detail_start() + self.detail_height
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Visible list rows, top to bottom.
    pub display_items: Vec<DisplayItem>,

    /// Width of the identity column, in characters.
    pub identity_width: usize,

    pub scroll: ScrollHints,

    pub query_bar: QueryBarInfo,

    pub details: Details,

    pub footer: FooterInfo,

    pub layout: Layout,
}

/// One row of the package list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Package identity, truncated to the identity column.
    pub identity: String,

    /// Short summary, truncated to the remaining width.
    pub summary: String,

    /// Selected and the list has focus.
    pub is_selected: bool,

    /// Byte ranges of `identity` to highlight as query matches.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Whether more rows exist beyond the visible window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollHints {
    pub above: bool,
    pub below: bool,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current focus.
    pub keybindings: String,
}

/// The `> query` input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBarInfo {
    pub query: String,

    /// The query has focus: draw a cursor after the text.
    pub editing: bool,
}

/// Content of the lower pane.
#[derive(Debug, Clone)]
pub enum Details {
    /// Metadata of the selected package.
    Record(DetailInfo),
    /// No package to show: loading, failure or no match.
    Empty(EmptyState),
}

#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub fields: Vec<DetailField>,
    pub long_summary: Option<String>,
}

/// A `Label: value` line of the detail pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// Message shown in place of package details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Render with the error color (no match, failed fetch).
    pub is_error: bool,
}
