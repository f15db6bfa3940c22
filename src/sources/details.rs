//! Per-package metadata for repository records.
//!
//! The repository search listing only carries identity and summary. The rest
//! of a remote package's metadata comes from `xbps-query -R -S <name>`, which
//! prints one `key: value` property per line. Array properties continue on
//! indented lines:
//!
//! ```text
//! homepage: https://www.zsh.org/
//! license: MIT
//! pkgver: zsh-5.9_1
//! repository: https://repo-default.voidlinux.org/current
//! run_depends:
//! 	libcap>=2.25_1
//! ```

use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// Metadata for one repository package. Missing properties stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub repository: Option<String>,
    pub homepage: Option<String>,
    pub license: Option<String>,
    pub maintainer: Option<String>,
    pub long_summary: Option<String>,
    pub installed_size: Option<String>,
}

/// Host command printing the properties of `record`'s package.
#[must_use]
pub fn command(record: &Record) -> Vec<String> {
    ["xbps-query", "-R", "-S", record.name()]
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Parses `xbps-query -S` output.
///
/// Unknown keys and array continuation lines are ignored, except that an
/// indented line following `long_desc` extends the description.
#[must_use]
pub fn parse(output: &str) -> PackageDetails {
    let _span = tracing::debug_span!("parse_package_details", output_len = output.len()).entered();

    let mut details = PackageDetails::default();
    let mut current: Option<&str> = None;

    for line in output.lines() {
        if line.starts_with(char::is_whitespace) {
            let text = line.trim();
            if current == Some("long_desc") && !text.is_empty() {
                if let Some(long) = details.long_summary.as_mut() {
                    if !long.is_empty() {
                        long.push(' ');
                    }
                    long.push_str(text);
                }
            }
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            current = None;
            continue;
        };
        let key = key.trim();
        current = Some(key);

        let value = value.trim();
        if value.is_empty() && key != "long_desc" {
            continue;
        }
        let value = value.to_string();

        match key {
            "repository" => details.repository = Some(value),
            "homepage" => details.homepage = Some(value),
            "license" => details.license = Some(value),
            "maintainer" => details.maintainer = Some(value),
            "long_desc" => details.long_summary = Some(value),
            "installed_size" => details.installed_size = Some(value),
            _ => {}
        }
    }

    if details.long_summary.as_deref() == Some("") {
        details.long_summary = None;
    }
    tracing::debug!(repository = ?details.repository, "package details parsed");
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Origin;

    const ZSH: &str = "\
architecture: x86_64
build-date: 2023-06-01 12:00 UTC
homepage: https://www.zsh.org/
installed_size: 6040KB
license: MIT
long_desc: Zsh is a shell designed for interactive use.
  It also works as a scripting language.
maintainer: Void Maintainer <void@example.org>
pkgver: zsh-5.9_1
repository: https://repo-default.voidlinux.org/current
run_depends:
\tlibcap>=2.25_1
\tpcre2>=10.42_1
short_desc: Z shell
";

    #[test]
    fn reads_known_properties() {
        let details = parse(ZSH);
        assert_eq!(
            details.repository.as_deref(),
            Some("https://repo-default.voidlinux.org/current")
        );
        assert_eq!(details.homepage.as_deref(), Some("https://www.zsh.org/"));
        assert_eq!(details.license.as_deref(), Some("MIT"));
        assert_eq!(
            details.maintainer.as_deref(),
            Some("Void Maintainer <void@example.org>")
        );
        assert_eq!(details.installed_size.as_deref(), Some("6040KB"));
    }

    #[test]
    fn long_desc_continues_on_indented_lines_only() {
        let details = parse(ZSH);
        assert_eq!(
            details.long_summary.as_deref(),
            Some("Zsh is a shell designed for interactive use. It also works as a scripting language.")
        );
    }

    #[test]
    fn empty_or_unrelated_output_has_no_details() {
        assert_eq!(parse(""), PackageDetails::default());
        assert_eq!(parse("run_depends:\n\tglibc>=2.36_1\n"), PackageDetails::default());
        assert_eq!(parse("long_desc:\n"), PackageDetails::default());
    }

    #[test]
    fn command_queries_by_package_name() {
        let record = Record::new(Origin::Remote, "python3-pip-23.1_1", "pip");
        assert_eq!(command(&record), vec!["xbps-query", "-R", "-S", "python3-pip"]);
    }
}
