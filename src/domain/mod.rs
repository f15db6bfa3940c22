//! Domain layer for the package browser.
//!
//! Core types independent of Zellij APIs: the package [`Record`], the
//! immutable [`RecordStore`] holding a session's records, and the crate-wide
//! error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Package record model
//! - [`store`]: Immutable, index-stable record store
//!
//! # Examples
//!
//! ```
//! use xbps_browse::domain::{Origin, Record, RecordStore};
//!
//! let store = RecordStore::new(vec![Record::new(Origin::Local, "zsh-5.9_2", "Z shell")]);
//! assert!(!store.is_empty());
//! ```

pub mod error;
pub mod record;
pub mod store;

pub use error::{BrowseError, Result};
pub use record::{InstallState, Origin, Record};
pub use store::RecordStore;
