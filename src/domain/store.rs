//! Immutable record store.
//!
//! The [`RecordStore`] owns every record for the session. A record's index
//! never changes while the store is alive, so indices produced by the filter
//! engine stay valid until the whole store is replaced.

use super::record::Record;

/// Ordered, read-only sequence of records.
///
/// Case-folded copies of `identity` and `short_summary` are computed once on
/// construction. ASCII folding keeps byte offsets identical to the original
/// text, which the list renderer relies on for match highlighting.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    folded: Vec<FoldedKeys>,
}

#[derive(Debug, Clone)]
struct FoldedKeys {
    identity: String,
    short_summary: String,
}

impl RecordStore {
    /// Builds a store from fetched records, preserving their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use xbps_browse::domain::{Origin, Record, RecordStore};
    ///
    /// let store = RecordStore::new(vec![
    ///     Record::new(Origin::Local, "foo-1", "Foo"),
    ///     Record::new(Origin::Local, "bar-2", "Bar"),
    /// ]);
    /// assert_eq!(store.len(), 2);
    /// assert_eq!(store.get(1).map(|r| r.identity.as_str()), Some("bar-2"));
    /// ```
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        let folded = records
            .iter()
            .map(|record| FoldedKeys {
                identity: record.identity.to_ascii_lowercase(),
                short_summary: record.short_summary.to_ascii_lowercase(),
            })
            .collect();
        Self { records, folded }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Returns `true` if the already-folded `needle` occurs in the record's
    /// identity or short summary.
    ///
    /// The summary is only examined when the identity does not match.
    pub(crate) fn folded_contains(&self, index: usize, needle: &str) -> bool {
        self.folded.get(index).is_some_and(|keys| {
            keys.identity.contains(needle) || keys.short_summary.contains(needle)
        })
    }

    /// Byte range of the first occurrence of `needle` (already folded) in the
    /// record's identity.
    pub(crate) fn identity_match(&self, index: usize, needle: &str) -> Option<(usize, usize)> {
        if needle.is_empty() {
            return None;
        }
        let keys = self.folded.get(index)?;
        keys.identity
            .find(needle)
            .map(|start| (start, start + needle.len()))
    }
}
