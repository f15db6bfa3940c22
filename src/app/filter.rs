//! Filter engine: the filtered view over the record store.
//!
//! [`recompute`] is a pure function of the store and the query. It always scans
//! the full store fresh, so narrowing and widening the query behave the same
//! and no state from an earlier query can leak into the result.
//!
//! # Match Rule
//!
//! - Empty query: every record matches, in store order.
//! - Otherwise: the query occurs, ignoring ASCII case, as a contiguous
//!   substring of the record's identity or of its short summary.
//!
//! [`MatchRule`] carries the same rule plus an optional case-insensitive
//! regular-expression mode, used by the data source for the startup search.
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::filter::recompute;
//! use xbps_browse::domain::{Origin, Record, RecordStore};
//!
//! let store = RecordStore::new(vec![
//!     Record::new(Origin::Local, "foo-1", "first"),
//!     Record::new(Origin::Local, "bar-2", "second"),
//!     Record::new(Origin::Local, "foobar-3", "third"),
//! ]);
//! let view = recompute(&store, "foo");
//! assert_eq!(view.as_slice(), &[0, 2]);
//! ```

use crate::domain::{Record, RecordStore, Result};
use regex::{Regex, RegexBuilder};

/// Ordered indices into the record store that match the current query.
///
/// Indices are strictly increasing. Growth is handled by the underlying
/// vector; callers only append, clear and iterate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    #[must_use]
    pub const fn new() -> Self {
        Self { indices: Vec::new() }
    }

    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Store index at `position` in the view.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Computes the filtered view for `query` over `store`.
#[must_use]
pub fn recompute(store: &RecordStore, query: &str) -> FilteredView {
    let mut view = FilteredView::new();
    refill(&mut view, store, query);
    view
}

/// Recomputes `view` in place, reusing its allocation.
///
/// Produces exactly what [`recompute`] would return for the same inputs.
pub fn refill(view: &mut FilteredView, store: &RecordStore, query: &str) {
    let _span = tracing::debug_span!(
        "refill_filtered_view",
        total_records = store.len(),
        query_len = query.len()
    )
    .entered();

    view.clear();

    if query.is_empty() {
        view.indices.extend(0..store.len());
        return;
    }

    let needle = query.to_ascii_lowercase();
    for index in 0..store.len() {
        if store.folded_contains(index, &needle) {
            view.push(index);
        }
    }

    tracing::trace!(filtered_count = view.len(), "filtered view recomputed");
}

/// A record predicate over identity and short summary.
#[derive(Debug, Clone)]
pub enum MatchRule {
    /// ASCII case-insensitive substring.
    Substring(String),
    /// Case-insensitive regular expression search.
    Regex(Regex),
}

impl MatchRule {
    /// Builds a rule from a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BrowseError::Pattern`] if `use_regex` is set and the
    /// pattern does not compile.
    pub fn new(pattern: &str, use_regex: bool) -> Result<Self> {
        if use_regex {
            let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            Ok(Self::Regex(regex))
        } else {
            Ok(Self::Substring(pattern.to_string()))
        }
    }

    /// Returns `true` if the record's identity or short summary matches.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Substring(needle) => {
                contains_ignore_ascii_case(&record.identity, needle)
                    || contains_ignore_ascii_case(&record.short_summary, needle)
            }
            Self::Regex(regex) => {
                regex.is_match(&record.identity) || regex.is_match(&record.short_summary)
            }
        }
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}
