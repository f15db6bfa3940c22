//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order; the library never calls the host API
//! itself.
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::Action;
//! use xbps_browse::domain::Origin;
//! use xbps_browse::sources::FetchRequest;
//!
//! let actions = vec![Action::Fetch(FetchRequest::new(Origin::Remote))];
//! ```

use crate::sources::FetchRequest;

/// Commands executed by the plugin shim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the plugin.
    Close,

    /// Runs the data source command for the request. Its output comes back
    /// as [`crate::app::Event::RecordsFetched`] or
    /// [`crate::app::Event::FetchFailed`].
    Fetch(FetchRequest),

    /// Looks up the metadata of the remote record at store `index`. Its
    /// output comes back as [`crate::app::Event::DetailsFetched`] or
    /// [`crate::app::Event::DetailsFailed`].
    FetchDetails { index: usize, command: Vec<String> },
}
