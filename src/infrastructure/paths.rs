//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is visible under `/host`, which maps to the directory
//! Zellij was started from (usually the user's home).

use std::path::PathBuf;

/// Host mount point inside the sandbox.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the trace file:
/// `/host/.local/share/zellij/xbps-browse`.
///
/// ```
/// use xbps_browse::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/xbps-browse"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("xbps-browse")
}

/// Maps `~` and `~/...` to the sandbox host mount. Used for files the plugin
/// reads itself, such as a custom theme.
///
/// ```
/// use xbps_browse::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/void.toml"), "/host/themes/void.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~user/x"), "~user/x");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
