//! xbps-browse: a Zellij plugin for browsing XBPS packages.
//!
//! The plugin lists the packages of a Void Linux system, either the
//! installed ones from the local package database or everything the
//! configured repositories offer, and lets the user narrow the list with an
//! incremental, case-insensitive substring query while reading each
//! package's metadata in a detail pane.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, input dispatch                   │
//! │  - Query buffer, filtered view, viewport            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────────────┐   ┌──────────────────────────┐
//! │ UI Layer (ui/)        │   │ Data Sources (sources/)  │
//! │ - Rendering           │   │ - pkgdb plist parser     │
//! │ - Theming             │   │ - xbps-query output      │
//! │ - Components          │   │ - Startup pattern        │
//! └───────────────────────┘   └──────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Package records, record store, errors            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state, event handling and the browsing engine
//! - [`domain`]: Core domain types (Record, RecordStore, errors)
//! - [`sources`]: Package data sources and their output parsers
//! - [`infrastructure`]: Sandbox path helpers
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/xbps-browse.wasm" {
//!         origin "remote"
//!         query "^python3-"
//!         regex "true"
//!         theme "void"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    build `AppState`, request the `RunCommands` permission.
//! 2. **Permission Granted**: the state emits `Action::Fetch`; the shim runs
//!    `cat <pkgdb>` or `xbps-query -R -s ""` on the host.
//! 3. **Command Result**: stdout is parsed into records, the startup pattern
//!    is applied, the store is replaced and the filtered view recomputed.
//! 4. **Browsing**: keys go through the dispatcher; every frame is computed
//!    from the state through a view model.
//! 5. **Details**: a selected remote record is looked up once with
//!    `xbps-query -R -S <name>`; the result is cached next to the store.
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::{handle_event, initialize, Config, Event, Origin};
//! use xbps_browse::app::{Key, KeyEvent};
//!
//! let config = Config { origin: Origin::Remote, ..Default::default() };
//! let mut state = initialize(&config);
//!
//! handle_event(&mut state, &Event::RecordsFetched {
//!     origin: Origin::Remote,
//!     output: "[-] foo-1.0_1  Foo\n[-] bar-2.0_1  Bar\n".to_string(),
//! })?;
//! for c in "ba".chars() {
//!     handle_event(&mut state, &Event::Key(Some(KeyEvent::press(Key::Tab))))?;
//!     handle_event(&mut state, &Event::Key(Some(KeyEvent::press(Key::Char(c)))))?;
//!     handle_event(&mut state, &Event::Key(Some(KeyEvent::press(Key::Tab))))?;
//! }
//! assert_eq!(state.filtered_count(), 1);
//! # Ok::<(), xbps_browse::BrowseError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Host**: Void Linux with `xbps-query` on the `PATH`

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod sources;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Focus, LoadStatus};
pub use domain::{BrowseError, Origin, Record, Result};
pub use sources::FetchRequest;
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/xbps-browse.wasm" {
///     origin "local"
///     pkgdb "/var/db/xbps/pkgdb-0.38.plist"
///     theme_file "~/.config/xbps-browse/theme.toml"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Installed packages (`local`, default) or repository packages (`remote`).
    pub origin: Origin,

    /// Startup pattern applied when the records are fetched. Empty keeps
    /// every package.
    pub query: String,

    /// Treat `query` as a case-insensitive regular expression.
    pub regex: bool,

    /// Path of the pkgdb plist on the host.
    pub pkgdb: String,

    /// Built-in theme name: `catppuccin-mocha`, `catppuccin-latte`, `void`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    /// See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: Origin::Local,
            query: String::new(),
            regex: false,
            pkgdb: sources::DEFAULT_PKGDB_PATH.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Malformed values fall back to their
    /// defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use xbps_browse::{Config, Origin};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("origin".to_string(), "remote".to_string());
    /// map.insert("query".to_string(), "^rust".to_string());
    /// map.insert("regex".to_string(), "yes".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.origin, Origin::Remote);
    /// assert_eq!(config.query, "^rust");
    /// assert!(config.regex);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let origin = config.get("origin").map_or(defaults.origin, |value| {
            Origin::parse(value).unwrap_or_else(|| {
                tracing::debug!(origin = %value, "unknown origin, using local");
                defaults.origin
            })
        });

        let regex = config.get("regex").map_or(defaults.regex, |value| {
            parse_flag("regex", value).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "using default");
                defaults.regex
            })
        });

        let pkgdb = config
            .get("pkgdb")
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map_or(defaults.pkgdb, String::from);

        Self {
            origin,
            query: config.get("query").cloned().unwrap_or_default(),
            regex,
            pkgdb,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The data source fetch described by this configuration.
    #[must_use]
    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            origin: self.origin,
            pattern: self.query.clone(),
            use_regex: self.regex,
            pkgdb_path: self.pkgdb.clone(),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => Err(BrowseError::Config(format!("{key}: expected a boolean, got {other:?}"))),
    }
}

/// Builds the initial, still loading, application state.
///
/// The theme comes from `theme_file`, then `theme`, then the default; a theme
/// that fails to load falls back to the default.
///
/// ```rust
/// use xbps_browse::{initialize, Config, LoadStatus};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.status, LoadStatus::Loading);
/// assert_eq!(state.theme.name, "catppuccin-mocha");
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(origin = %config.origin, "initializing xbps-browse plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.fetch_request())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[("origin", "mirror"), ("regex", "maybe"), ("pkgdb", "  ")]));
        assert_eq!(config.origin, Origin::Local);
        assert!(!config.regex);
        assert_eq!(config.pkgdb, sources::DEFAULT_PKGDB_PATH);
    }

    #[test]
    fn flags_reject_garbage() {
        assert!(parse_flag("regex", "ON").unwrap());
        assert!(!parse_flag("regex", "0").unwrap());
        assert!(matches!(parse_flag("regex", "maybe"), Err(BrowseError::Config(_))));
    }

    #[test]
    fn fetch_request_reflects_config() {
        let config = Config::from_zellij(&map(&[
            ("origin", "remote"),
            ("query", "vim"),
            ("pkgdb", "/tmp/pkgdb.plist"),
        ]));
        let request = config.fetch_request();
        assert_eq!(request.origin, Origin::Remote);
        assert_eq!(request.pattern, "vim");
        assert!(!request.use_regex);
        assert_eq!(request.pkgdb_path, "/tmp/pkgdb.plist");
    }

    #[test]
    fn bad_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("void".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Default::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());

        let config = Config { theme_name: Some("void".to_string()), ..Default::default() };
        assert_eq!(initialize(&config).theme.name, "void");
    }
}
