//! Parser for remote repository search output.
//!
//! `xbps-query -R -s ""` prints one package per line, with the identity
//! column padded to the widest entry:
//!
//! ```text
//! [*] bash-5.2.21_1           GNU Bourne Again Shell
//! [-] zsh-5.9_1               Z shell
//! ```
//!
//! `[*]` marks installed packages. The flag is not carried over; remote
//! records have no install state.

use crate::domain::{Origin, Record};

/// Parses search output into remote records, in output order.
///
/// Lines that do not follow the `[x] pkgver description` shape are skipped.
#[must_use]
pub fn parse(output: &str) -> Vec<Record> {
    let _span = tracing::debug_span!("parse_repo_search", output_len = output.len()).entered();

    let records: Vec<Record> = output.lines().filter_map(parse_line).collect();
    tracing::debug!(records = records.len(), "repository search parsed");
    records
}

fn parse_line(line: &str) -> Option<Record> {
    let rest = line.trim_start().strip_prefix('[')?;
    let (_flag, rest) = rest.split_once(']')?;
    let rest = rest.trim_start();

    let (identity, summary) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(identity, summary)| (identity, summary.trim()));

    if identity.is_empty() {
        return None;
    }
    Some(Record::new(Origin::Remote, identity, summary))
}
