//! Package record model.
//!
//! A [`Record`] is one package's metadata entry as delivered by the data
//! source. Records are created in bulk when the package list is fetched and
//! never change afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The local package database (installed packages).
    #[default]
    Local,
    /// The configured remote repositories.
    Remote,
}

impl Origin {
    /// Parses an origin from its configuration spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }

    /// Lowercase name used in configuration and command context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installation state of a local package, as recorded by xbps.
///
/// The browser treats this as an opaque token: it is displayed, never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallState {
    Installed,
    Unpacked,
    Broken,
    HalfRemoved,
    NotInstalled,
    Other(String),
}

impl InstallState {
    /// Maps the pkgdb `state` string to a state token.
    #[must_use]
    pub fn from_pkgdb(value: &str) -> Self {
        match value {
            "installed" => Self::Installed,
            "unpacked" => Self::Unpacked,
            "broken" => Self::Broken,
            "half-removed" => Self::HalfRemoved,
            "not-installed" => Self::NotInstalled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => f.write_str("installed"),
            Self::Unpacked => f.write_str("unpacked"),
            Self::Broken => f.write_str("broken"),
            Self::HalfRemoved => f.write_str("half-removed"),
            Self::NotInstalled => f.write_str("not-installed"),
            Self::Other(state) => f.write_str(state),
        }
    }
}

/// One package's metadata entry.
///
/// `identity` is the xbps `pkgver` string (`name-version_revision`).
/// `source_repository` is only set for remote records and `install_state`
/// only for local ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub origin: Origin,
    pub identity: String,
    pub short_summary: String,
    pub long_summary: Option<String>,
    pub maintainer: Option<String>,
    pub homepage: Option<String>,
    pub license: Option<String>,
    pub installed_size: Option<String>,
    pub source_repository: Option<String>,
    pub install_state: Option<InstallState>,
}

impl Record {
    /// Creates a record with only the two always-present fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use xbps_browse::domain::{Origin, Record};
    ///
    /// let record = Record::new(Origin::Local, "foo-1.0_1", "Foo tool");
    /// assert_eq!(record.name(), "foo");
    /// assert!(record.maintainer.is_none());
    /// ```
    #[must_use]
    pub fn new(origin: Origin, identity: impl Into<String>, short_summary: impl Into<String>) -> Self {
        Self {
            origin,
            identity: identity.into(),
            short_summary: short_summary.into(),
            long_summary: None,
            maintainer: None,
            homepage: None,
            license: None,
            installed_size: None,
            source_repository: None,
            install_state: None,
        }
    }

    /// Package name without the version suffix.
    ///
    /// xbps package names may contain dashes, the version never does, so the
    /// name is everything before the last dash.
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity
            .rsplit_once('-')
            .map_or(self.identity.as_str(), |(name, _version)| name)
    }

    /// Version part of the identity, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.identity.rsplit_once('-').map(|(_name, version)| version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_version_split_on_last_dash() {
        let record = Record::new(Origin::Local, "python3-pip-23.2_1", "pip");
        assert_eq!(record.name(), "python3-pip");
        assert_eq!(record.version(), Some("23.2_1"));
    }

    #[test]
    fn identity_without_dash_is_its_own_name() {
        let record = Record::new(Origin::Remote, "weird", "no version");
        assert_eq!(record.name(), "weird");
        assert_eq!(record.version(), None);
    }

    #[test]
    fn origin_parses_case_insensitively() {
        assert_eq!(Origin::parse(" Remote "), Some(Origin::Remote));
        assert_eq!(Origin::parse("local"), Some(Origin::Local));
        assert_eq!(Origin::parse("mirror"), None);
    }

    #[test]
    fn pkgdb_states_map_to_tokens() {
        assert_eq!(InstallState::from_pkgdb("installed"), InstallState::Installed);
        assert_eq!(InstallState::from_pkgdb("half-removed"), InstallState::HalfRemoved);
        assert_eq!(
            InstallState::from_pkgdb("config-files"),
            InstallState::Other("config-files".to_string())
        );
        assert_eq!(InstallState::HalfRemoved.to_string(), "half-removed");
    }
}
