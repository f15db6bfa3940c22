//! Focus and load-status types for the application.
//!
//! The browser has two focus areas: the query text and the package list.
//! Focus decides which component receives key events.
//!
//! # State Machine
//!
//! ```text
//!            Tab / Enter
//! QueryEdit ────────────► ListNav
//!     ▲                      │
//!     └──────── Tab ─────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::Focus;
//!
//! let focus = Focus::default();
//! assert_eq!(focus, Focus::ListNav);
//! assert_eq!(focus.toggled(), Focus::QueryEdit);
//! ```

/// Which area currently receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing edits the query; each edit re-filters the list.
    ///
    /// Accepts printable characters, backspace, and enter (commits to
    /// [`Focus::ListNav`]).
    QueryEdit,

    /// Arrow, page and `j`/`k` keys move the selection.
    #[default]
    ListNav,
}

impl Focus {
    /// Returns the other focus area.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::QueryEdit => Self::ListNav,
            Self::ListNav => Self::QueryEdit,
        }
    }
}

/// Progress of the one-time package fetch.
///
/// The list engine only runs once the status is [`LoadStatus::Ready`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Waiting for permissions or for the data source command to finish.
    #[default]
    Loading,
    /// Records are in the store.
    Ready,
    /// The fetch failed; the message is shown to the user.
    Failed(String),
}
