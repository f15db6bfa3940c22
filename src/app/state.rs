//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the browser: the record
//! store, the filtered view over it, the viewport, the query text and the
//! focus. The filtered view and the viewport are private so they can only
//! change together with the query or the store.
//!
//! # State Components
//!
//! - **Store**: every fetched record, replaced as a whole on fetch
//! - **Filtered view**: store indices matching the query
//! - **Viewport**: selection and scroll window over the filtered view
//! - **Query**: bounded filter text
//! - **Focus / status**: which area gets keys, and whether data is loaded
//! - **Details**: looked-up metadata of remote records, keyed by store index
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::AppState;
//! use xbps_browse::domain::{Origin, Record};
//!
//! let mut state = AppState::default();
//! state.replace_records(vec![
//!     Record::new(Origin::Local, "foo-1", "Foo"),
//!     Record::new(Origin::Local, "bar-2", "Bar"),
//! ]);
//! state.push_query_char('b');
//! assert_eq!(state.filtered_count(), 1);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.display_items[0].identity, "bar-2");
//! ```

use super::actions::Action;
use super::filter::{self, FilteredView};
use super::modes::{Focus, LoadStatus};
use super::query::Query;
use super::viewport::Viewport;
use crate::domain::{Origin, Record, RecordStore};
use crate::sources::{details, FetchRequest, PackageDetails};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailField, DetailInfo, Details, DisplayItem, EmptyState, FooterInfo, HeaderInfo, Layout,
    QueryBarInfo, ScrollHints, UIViewModel,
};
use std::collections::{HashMap, HashSet};

/// Central application state container.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: RecordStore,
    filtered: FilteredView,
    viewport: Viewport,
    query: Query,
    details: HashMap<usize, PackageDetails>,
    pending_details: HashSet<usize>,

    /// Area receiving key events.
    pub focus: Focus,

    /// Progress of the package fetch.
    pub status: LoadStatus,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// The fetch issued once permissions are granted.
    pub request: FetchRequest,
}

impl AppState {
    /// Creates an empty, loading state.
    #[must_use]
    pub fn new(theme: Theme, request: FetchRequest) -> Self {
        Self {
            store: RecordStore::default(),
            filtered: FilteredView::new(),
            viewport: Viewport::default(),
            query: Query::new(),
            details: HashMap::new(),
            pending_details: HashSet::new(),
            focus: Focus::default(),
            status: LoadStatus::Loading,
            theme,
            request,
        }
    }

    /// Builds a ready state over `records`.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        let mut state = Self::default();
        state.replace_records(records);
        state
    }

    /// Installs a freshly fetched store, re-filters with the current query
    /// and marks the state ready.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        tracing::debug!(records = records.len(), "replacing record store");
        self.store = RecordStore::new(records);
        self.details.clear();
        self.pending_details.clear();
        self.refilter();
        self.status = LoadStatus::Ready;
    }

    /// Marks the fetch as failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "package fetch failed");
        self.status = LoadStatus::Failed(message);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub fn filtered(&self) -> &FilteredView {
        &self.filtered
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    /// Recomputes the filtered view and resets the selection to the top.
    pub fn refilter(&mut self) {
        filter::refill(&mut self.filtered, &self.store, self.query.as_str());
        self.viewport.reset();
    }

    /// Appends to the query and re-filters. Returns `false` when the
    /// character was rejected, in which case nothing is recomputed.
    pub fn push_query_char(&mut self, c: char) -> bool {
        if !self.query.push(c) {
            return false;
        }
        self.refilter();
        true
    }

    /// Deletes the last query character and re-filters. Returns `false` on
    /// an empty query, in which case nothing is recomputed.
    pub fn pop_query_char(&mut self) -> bool {
        if !self.query.pop() {
            return false;
        }
        self.refilter();
        true
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
        tracing::debug!(focus = ?self.focus, "focus switched");
    }

    /// Applies the list height for a terminal of `rows` rows.
    pub fn set_viewport_height(&mut self, rows: usize) {
        let height = Layout::for_rows(rows).list_height;
        if height != self.viewport.height() {
            self.viewport.resize(height, self.filtered.len());
        }
    }

    pub fn move_down(&mut self) {
        self.viewport.move_down(self.filtered.len());
    }

    pub fn move_up(&mut self) {
        self.viewport.move_up(self.filtered.len());
    }

    pub fn page_down(&mut self) {
        self.viewport.page_down(self.filtered.len());
    }

    pub fn page_up(&mut self) {
        self.viewport.page_up(self.filtered.len());
    }

    /// The record under the cursor, if the filtered view is non-empty.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Record> {
        self.filtered
            .get(self.viewport.selected())
            .and_then(|index| self.store.get(index))
    }

    /// Requests the metadata of the selected record when it is remote and
    /// neither looked up nor in flight.
    pub fn detail_actions(&mut self) -> Vec<Action> {
        if !self.is_ready() {
            return vec![];
        }
        let Some(index) = self.filtered.get(self.viewport.selected()) else {
            return vec![];
        };
        let Some(record) = self.store.get(index) else {
            return vec![];
        };
        if record.origin != Origin::Remote
            || self.details.contains_key(&index)
            || !self.pending_details.insert(index)
        {
            return vec![];
        }

        tracing::debug!(index, pkg = record.name(), "looking up package details");
        vec![Action::FetchDetails {
            index,
            command: details::command(record),
        }]
    }

    /// Stores a finished lookup. Returns `false` for lookups this store
    /// never issued.
    pub fn store_details(&mut self, index: usize, details: PackageDetails) -> bool {
        if !self.pending_details.remove(&index) {
            tracing::debug!(index, "dropping stale package details");
            return false;
        }
        self.details.insert(index, details);
        true
    }

    /// Cached metadata for the record at store `index`.
    #[must_use]
    pub fn details(&self, index: usize) -> Option<&PackageDetails> {
        self.details.get(&index)
    }

    /// Actions to run once the plugin may execute host commands.
    #[must_use]
    pub fn startup_actions(&self) -> Vec<Action> {
        vec![Action::Fetch(self.request.clone())]
    }

    /// Computes a renderable view model for a `rows` x `cols` terminal.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let layout = Layout::for_rows(rows);
        let identity_width = (cols / 3).clamp(12, 40);

        let (display_items, scroll) = if self.is_ready() {
            self.compute_display_items(cols, identity_width)
        } else {
            (Vec::new(), ScrollHints::default())
        };

        UIViewModel {
            header: self.compute_header(),
            display_items,
            identity_width,
            scroll,
            query_bar: QueryBarInfo {
                query: self.query.as_str().to_string(),
                editing: self.focus == Focus::QueryEdit,
            },
            details: self.compute_details(),
            footer: self.compute_footer(),
            layout,
        }
    }

    fn compute_display_items(&self, cols: usize, identity_width: usize) -> (Vec<DisplayItem>, ScrollHints) {
        // Left margin, column gap and the scroll hint column.
        let summary_width = cols.saturating_sub(identity_width + 3);
        let count = self.filtered.len();
        let needle = self.query.as_str().to_ascii_lowercase();

        let items = self
            .viewport
            .visible_range(count)
            .filter_map(|position| {
                let index = self.filtered.get(position)?;
                let record = self.store.get(index)?;
                let identity = truncate(&record.identity, identity_width);
                // Highlights never extend onto the ellipsis.
                let kept = if identity == record.identity {
                    identity.len()
                } else {
                    identity.len().saturating_sub(3)
                };
                let highlight_ranges = self
                    .store
                    .identity_match(index, &needle)
                    .and_then(|(start, end)| {
                        let end = end.min(kept);
                        (start < end).then_some((start, end))
                    })
                    .into_iter()
                    .collect();

                Some(DisplayItem {
                    identity,
                    summary: truncate(&record.short_summary, summary_width),
                    is_selected: self.focus == Focus::ListNav && position == self.viewport.selected(),
                    highlight_ranges,
                })
            })
            .collect();

        let scroll = ScrollHints {
            above: self.viewport.has_more_above(),
            below: self.viewport.has_more_below(count),
        };
        (items, scroll)
    }

    fn compute_header(&self) -> HeaderInfo {
        let source = match self.request.origin {
            Origin::Local => "installed packages",
            Origin::Remote => "repository packages",
        };
        let title = match &self.status {
            LoadStatus::Ready => format!(
                " xbps-browse: {source} ({}/{}) ",
                self.filtered.len(),
                self.store.len()
            ),
            LoadStatus::Loading | LoadStatus::Failed(_) => format!(" xbps-browse: {source} "),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.status, self.focus) {
            (LoadStatus::Ready, Focus::ListNav) => {
                "j/k or Up/Down: navigate  PgUp/PgDn: page  Tab: edit query  Esc: quit"
            }
            (LoadStatus::Ready, Focus::QueryEdit) => {
                "Type to filter  Backspace: delete  Enter/Tab: browse list  Esc: quit"
            }
            _ => "Esc: quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_details(&self) -> Details {
        match &self.status {
            LoadStatus::Loading => Details::Empty(EmptyState {
                message: "Loading packages\u{2026}".to_string(),
                subtitle: format!("reading {} package list", self.request.origin),
                is_error: false,
            }),
            LoadStatus::Failed(message) => Details::Empty(EmptyState {
                message: "Failed to load packages".to_string(),
                subtitle: message.clone(),
                is_error: true,
            }),
            LoadStatus::Ready => {
                let selected = self.filtered.get(self.viewport.selected());
                selected
                    .and_then(|index| Some((self.store.get(index)?, self.details.get(&index))))
                    .map_or_else(
                        || {
                            Details::Empty(EmptyState {
                                message: "No Match".to_string(),
                                subtitle: String::new(),
                                is_error: true,
                            })
                        },
                        |(record, looked_up)| Details::Record(detail_info(record, looked_up)),
                    )
            }
        }
    }
}

/// Builds the detail fields, preferring record data over looked-up data.
fn detail_info(record: &Record, looked_up: Option<&PackageDetails>) -> DetailInfo {
    let nothing = PackageDetails::default();
    let found = looked_up.unwrap_or(&nothing);
    let merged = |own: Option<&String>, other: Option<&String>| own.or(other).cloned();
    let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());

    let mut fields = vec![
        DetailField { label: "Pkg", value: record.identity.clone() },
        DetailField { label: "Desc", value: record.short_summary.clone() },
        DetailField {
            label: "Homepage",
            value: or_na(merged(record.homepage.as_ref(), found.homepage.as_ref())),
        },
        DetailField {
            label: "License",
            value: or_na(merged(record.license.as_ref(), found.license.as_ref())),
        },
        DetailField {
            label: "Maintainer",
            value: or_na(merged(record.maintainer.as_ref(), found.maintainer.as_ref())),
        },
    ];
    if let Some(state) = &record.install_state {
        fields.push(DetailField { label: "State", value: state.to_string() });
    }
    if let Some(repository) = merged(record.source_repository.as_ref(), found.repository.as_ref()) {
        fields.push(DetailField { label: "Repository", value: repository });
    }
    if let Some(size) = merged(record.installed_size.as_ref(), found.installed_size.as_ref()) {
        fields.push(DetailField { label: "Size", value: size });
    }

    DetailInfo {
        fields,
        long_summary: merged(record.long_summary.as_ref(), found.long_summary.as_ref()),
    }
}
