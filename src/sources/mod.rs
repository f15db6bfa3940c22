//! Package data sources.
//!
//! Records come from one of two places, chosen by [`Origin`]:
//!
//! - [`Origin::Local`]: the xbps package database plist, read with `cat`
//!   and parsed by [`pkgdb::parse`].
//! - [`Origin::Remote`]: the output of `xbps-query -R -s ""`, parsed by
//!   [`repo::parse`]. Metadata beyond identity and summary is looked up
//!   per package with [`details::command`] and parsed by [`details::parse`].
//!
//! The plugin sandbox cannot read the host filesystem directly, so the
//! shim runs the command from [`FetchRequest::command`] and hands the
//! captured stdout to [`fetch_all`].
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::domain::Origin;
//! use xbps_browse::sources::{fetch_all, FetchRequest};
//!
//! let request = FetchRequest::new(Origin::Remote);
//! assert_eq!(request.command(), vec!["xbps-query", "-R", "-s", ""]);
//!
//! let records = fetch_all(&request, "[-] zsh-5.9_1    Z shell\n")?;
//! assert_eq!(records[0].identity, "zsh-5.9_1");
//! # Ok::<(), xbps_browse::BrowseError>(())
//! ```

pub mod details;
pub mod pkgdb;
pub mod repo;

pub use details::PackageDetails;

use crate::app::filter::MatchRule;
use crate::domain::{Origin, Record, Result};
use serde::{Deserialize, Serialize};

/// Location of the installed-package database on a Void Linux host.
pub const DEFAULT_PKGDB_PATH: &str = "/var/db/xbps/pkgdb-0.38.plist";

/// One data source fetch: where to read and which startup pattern to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub origin: Origin,
    /// Fetch-time filter. Empty keeps every record.
    pub pattern: String,
    /// Treat `pattern` as a case-insensitive regular expression.
    pub use_regex: bool,
    pub pkgdb_path: String,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(Origin::Local)
    }
}

impl FetchRequest {
    #[must_use]
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            pattern: String::new(),
            use_regex: false,
            pkgdb_path: DEFAULT_PKGDB_PATH.to_string(),
        }
    }

    /// Host command whose stdout holds the records.
    #[must_use]
    pub fn command(&self) -> Vec<String> {
        match self.origin {
            Origin::Local => vec!["cat".to_string(), self.pkgdb_path.clone()],
            Origin::Remote => ["xbps-query", "-R", "-s", ""]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Parses command output for `request` and applies its startup pattern.
///
/// # Errors
///
/// - [`crate::BrowseError::Parse`] if the pkgdb plist is malformed
/// - [`crate::BrowseError::Pattern`] if the regex pattern does not compile
pub fn fetch_all(request: &FetchRequest, output: &str) -> Result<Vec<Record>> {
    let _span = tracing::debug_span!(
        "fetch_all",
        origin = %request.origin,
        output_len = output.len(),
        use_regex = request.use_regex
    )
    .entered();

    let records = match request.origin {
        Origin::Local => pkgdb::parse(output)?,
        Origin::Remote => repo::parse(output),
    };
    tracing::debug!(parsed = records.len(), "records parsed");

    select(records, &request.pattern, request.use_regex)
}

/// Keeps the records whose identity or short summary match `pattern`.
///
/// # Errors
///
/// Returns [`crate::BrowseError::Pattern`] when `use_regex` is set and the
/// pattern is invalid.
pub fn select(records: Vec<Record>, pattern: &str, use_regex: bool) -> Result<Vec<Record>> {
    if pattern.is_empty() {
        return Ok(records);
    }

    let rule = MatchRule::new(pattern, use_regex)?;
    let selected: Vec<Record> = records.into_iter().filter(|r| rule.matches(r)).collect();
    tracing::debug!(pattern = %pattern, selected = selected.len(), "startup pattern applied");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BrowseError;

    fn records() -> Vec<Record> {
        vec![
            Record::new(Origin::Remote, "python3-3.12_1", "Python interpreter"),
            Record::new(Origin::Remote, "perl-5.38_1", "Practical Extraction and Report Language"),
            Record::new(Origin::Remote, "ruby-3.3_1", "Ruby programming language"),
        ]
    }

    #[test]
    fn local_command_reads_configured_pkgdb() {
        let mut request = FetchRequest::new(Origin::Local);
        assert_eq!(request.command(), vec!["cat", DEFAULT_PKGDB_PATH]);
        request.pkgdb_path = "/tmp/pkgdb.plist".to_string();
        assert_eq!(request.command(), vec!["cat", "/tmp/pkgdb.plist"]);
    }

    #[test]
    fn empty_pattern_keeps_everything_in_order() {
        let selected = select(records(), "", true).unwrap();
        assert_eq!(selected, records());
    }

    #[test]
    fn substring_pattern_filters_both_fields() {
        let selected = select(records(), "LANGUAGE", false).unwrap();
        let ids: Vec<_> = selected.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["perl-5.38_1", "ruby-3.3_1"]);
    }

    #[test]
    fn regex_pattern_filters_case_insensitively() {
        let selected = select(records(), "^(python|RUBY)", true).unwrap();
        let ids: Vec<_> = selected.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["python3-3.12_1", "ruby-3.3_1"]);
    }

    #[test]
    fn invalid_regex_is_a_pattern_error() {
        let err = select(records(), "(", true).unwrap_err();
        assert!(matches!(err, BrowseError::Pattern(_)));
    }

    #[test]
    fn fetch_all_routes_by_origin() {
        let mut request = FetchRequest::new(Origin::Remote);
        request.pattern = "vim".to_string();
        let output = "[*] vim-9.0_1   Vim editor\n[-] nano-7.2_1   Small editor\n";
        let records = fetch_all(&request, output).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin, Origin::Remote);

        let request = FetchRequest::new(Origin::Local);
        assert!(fetch_all(&request, "<plist><dict>").is_err());
    }
}
