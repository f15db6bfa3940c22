//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the domain,
//! data source and UI layers. It owns the browsing engine: the filter, the
//! viewport and the input dispatcher.
//!
//! # Architecture
//!
//! ```text
//! Key Event → Dispatcher → Query Edit → Filter Recompute → Viewport Reset
//!                       └→ Navigation → Viewport Update
//!
//! Fetch Output → Data Source → Store Replacement → Filter Recompute
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`dispatch`]: Key event + focus → state change
//! - [`filter`]: Filtered view over the record store
//! - [`handler`]: Plugin-level event processing
//! - [`modes`]: Focus and load status
//! - [`query`]: Bounded query buffer
//! - [`state`]: Central application state and view model computation
//! - [`viewport`]: Selection and scroll window
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::{handle_event, AppState, Event, Key, KeyEvent};
//! use xbps_browse::domain::{Origin, Record};
//!
//! let mut state = AppState::with_records(vec![
//!     Record::new(Origin::Local, "foo-1", "Foo"),
//!     Record::new(Origin::Local, "bar-2", "Bar"),
//! ]);
//! handle_event(&mut state, &Event::Key(Some(KeyEvent::press(Key::Down))))?;
//! assert_eq!(state.selected_record().map(|r| r.identity.as_str()), Some("bar-2"));
//! # Ok::<(), xbps_browse::BrowseError>(())
//! ```

pub mod actions;
pub mod dispatch;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod query;
pub mod state;
pub mod viewport;

pub use actions::Action;
pub use dispatch::{dispatch, Dispatch, Key, KeyEvent, KeyKind};
pub use filter::{recompute, FilteredView, MatchRule};
pub use handler::{handle_event, Event};
pub use modes::{Focus, LoadStatus};
pub use query::{Query, QUERY_CAPACITY};
pub use state::AppState;
pub use viewport::Viewport;
