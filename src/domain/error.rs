//! Error types for the package browser.
//!
//! This module defines the centralized error type [`BrowseError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Empty search results and a full query buffer are not errors; they are
//! ordinary states handled where they occur.

use thiserror::Error;

/// The main error type for package browser operations.
///
/// # Examples
///
/// ```
/// use xbps_browse::BrowseError;
///
/// fn check_event(present: bool) -> Result<(), BrowseError> {
///     if present {
///         Ok(())
///     } else {
///         Err(BrowseError::Input("missing key event".to_string()))
///     }
/// }
///
/// assert!(check_event(false).is_err());
/// ```
#[derive(Debug, Error)]
pub enum BrowseError {
    /// A key event was missing or malformed.
    ///
    /// Fatal for the session: the shell stops instead of continuing.
    #[error("Input error: {0}")]
    Input(String),

    /// The package data source failed or produced unusable output.
    #[error("Source error: {0}")]
    Source(String),

    /// The package database could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The startup search pattern is not a valid regular expression.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::Error> for BrowseError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// A specialized `Result` type for package browser operations.
pub type Result<T> = std::result::Result<T, BrowseError>;
