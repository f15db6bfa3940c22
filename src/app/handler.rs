//! Event handling and state transition logic.
//!
//! [`handle_event`] is the entry point for everything the plugin shim
//! receives: decoded keys, data source output and the permission outcome.
//! It mutates [`AppState`] and returns whether to re-render plus the actions
//! to execute.
//!
//! # Event Types
//!
//! - **Input**: `Key`, routed through the input dispatcher
//! - **Data source**: `RecordsFetched`, `FetchFailed`
//! - **Package details**: `DetailsFetched`, `DetailsFailed`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`
//!
//! Until the records are loaded only Escape is honoured, so a failed or slow
//! fetch can always be dismissed.
//!
//! Whenever a remote record ends up selected, its metadata is requested
//! with [`Action::FetchDetails`] unless it is cached or already in flight.
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::{handle_event, Action, AppState, Event, Key, KeyEvent};
//!
//! let mut state = AppState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Key(Some(KeyEvent::press(Key::Escape))))?;
//! assert_eq!(actions, vec![Action::Close]);
//! # Ok::<(), xbps_browse::BrowseError>(())
//! ```

use super::dispatch::{dispatch, Dispatch, Key, KeyEvent};
use super::{Action, AppState};
use crate::domain::{BrowseError, Origin, Result};
use crate::sources::{self, details, PackageDetails};

/// Events delivered by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A decoded key event, or `None` when the input source returned nothing.
    Key(Option<KeyEvent>),

    /// The data source command succeeded.
    RecordsFetched {
        origin: Origin,
        /// Captured stdout.
        output: String,
    },

    /// The data source command failed to run or exited non-zero.
    FetchFailed { origin: Origin, error: String },

    /// A package detail lookup succeeded for the record at store `index`.
    DetailsFetched { index: usize, output: String },

    /// A package detail lookup failed. The record keeps its listing data.
    DetailsFailed { index: usize, error: String },

    /// The host granted the requested permissions.
    PermissionsGranted,

    /// The host denied the requested permissions.
    PermissionsDenied,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`.
///
/// # Errors
///
/// Returns [`BrowseError::Input`] when a key event is missing. The session
/// cannot continue after that.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Key(key) => {
            let (render, mut actions) = handle_key(state, key.as_ref())?;
            if actions.is_empty() {
                actions = state.detail_actions();
            }
            Ok((render, actions))
        }
        Event::RecordsFetched { origin, output } => {
            if *origin != state.request.origin {
                tracing::debug!(origin = %origin, "ignoring output for another origin");
                return Ok((false, vec![]));
            }

            match sources::fetch_all(&state.request, output) {
                Ok(records) => {
                    tracing::info!(origin = %origin, records = records.len(), "packages loaded");
                    state.replace_records(records);
                    return Ok((true, state.detail_actions()));
                }
                Err(e) => state.fail(e.to_string()),
            }
            Ok((true, vec![]))
        }
        Event::FetchFailed { origin, error } => {
            let error = BrowseError::Source(format!("{origin} fetch failed: {error}"));
            state.fail(error.to_string());
            Ok((true, vec![]))
        }
        Event::DetailsFetched { index, output } => {
            Ok((state.store_details(*index, details::parse(output)), vec![]))
        }
        Event::DetailsFailed { index, error } => {
            tracing::warn!(index, error = %error, "package detail lookup failed");
            state.store_details(*index, PackageDetails::default());
            Ok((false, vec![]))
        }
        Event::PermissionsGranted => {
            tracing::debug!("permissions granted, fetching packages");
            Ok((false, state.startup_actions()))
        }
        Event::PermissionsDenied => {
            state.fail("permission denied");
            Ok((true, vec![]))
        }
    }
}

fn handle_key(state: &mut AppState, key: Option<&KeyEvent>) -> Result<(bool, Vec<Action>)> {
    let Some(key) = key else {
        tracing::error!("input source returned no event");
        return Err(BrowseError::Input("no key event received".to_string()));
    };

    if !state.is_ready() {
        if key.is_press() && key.key == Key::Escape {
            return Ok((false, vec![Action::Close]));
        }
        return Ok((false, vec![]));
    }

    match dispatch(state, Some(key)) {
        Dispatch::Exit => Ok((false, vec![Action::Close])),
        Dispatch::SwitchFocus => {
            state.toggle_focus();
            Ok((true, vec![]))
        }
        Dispatch::Continue => Ok((key.is_press(), vec![])),
        Dispatch::Error => Err(BrowseError::Input("key event lost during dispatch".to_string())),
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Key(_) => "Key",
        Event::RecordsFetched { .. } => "RecordsFetched",
        Event::FetchFailed { .. } => "FetchFailed",
        Event::DetailsFetched { .. } => "DetailsFetched",
        Event::DetailsFailed { .. } => "DetailsFailed",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Focus, LoadStatus};
    use crate::domain::Record;
    use crate::sources::FetchRequest;
    use crate::ui::viewmodel::Details;

    fn key(key: Key) -> Event {
        Event::Key(Some(KeyEvent::press(key)))
    }

    fn remote_state() -> AppState {
        let mut state = AppState::default();
        state.request = FetchRequest::new(Origin::Remote);
        state
    }

    #[test]
    fn permission_grant_requests_fetch() {
        let mut state = remote_state();
        let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::Fetch(FetchRequest::new(Origin::Remote))]);
    }

    #[test]
    fn fetched_records_make_state_ready() {
        let mut state = remote_state();
        let event = Event::RecordsFetched {
            origin: Origin::Remote,
            output: "[-] vim-9.0_1   Vi IMproved\n[-] nano-7.2_1  GNU nano\n".to_string(),
        };
        let (render, _) = handle_event(&mut state, &event).unwrap();
        assert!(render);
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(state.filtered_count(), 2);
    }

    #[test]
    fn output_for_other_origin_is_ignored() {
        let mut state = remote_state();
        let event = Event::RecordsFetched {
            origin: Origin::Local,
            output: String::new(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        assert_eq!(state.status, LoadStatus::Loading);
    }

    #[test]
    fn unparsable_pkgdb_fails_the_load() {
        let mut state = AppState::default();
        let event = Event::RecordsFetched {
            origin: Origin::Local,
            output: "not xml".to_string(),
        };
        handle_event(&mut state, &event).unwrap();
        assert!(matches!(state.status, LoadStatus::Failed(_)));
    }

    #[test]
    fn fetch_failure_and_denial_are_displayed() {
        let mut state = AppState::default();
        let event = Event::FetchFailed {
            origin: Origin::Local,
            error: "No such file".to_string(),
        };
        handle_event(&mut state, &event).unwrap();
        assert_eq!(
            state.status,
            LoadStatus::Failed("Source error: local fetch failed: No such file".to_string())
        );

        let mut state = AppState::default();
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert_eq!(state.status, LoadStatus::Failed("permission denied".to_string()));
    }

    #[test]
    fn only_escape_works_before_ready() {
        let mut state = AppState::default();
        assert_eq!(handle_event(&mut state, &key(Key::Tab)).unwrap(), (false, vec![]));
        assert_eq!(state.focus, Focus::ListNav);
        assert_eq!(
            handle_event(&mut state, &key(Key::Escape)).unwrap(),
            (false, vec![Action::Close])
        );
    }

    #[test]
    fn tab_flips_focus_once_ready() {
        let mut state = AppState::with_records(vec![]);
        let (render, actions) = handle_event(&mut state, &key(Key::Tab)).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.focus, Focus::QueryEdit);
        handle_event(&mut state, &key(Key::Tab)).unwrap();
        assert_eq!(state.focus, Focus::ListNav);
    }

    #[test]
    fn missing_key_is_an_input_error() {
        let mut state = AppState::with_records(vec![]);
        let err = handle_event(&mut state, &Event::Key(None)).unwrap_err();
        assert!(matches!(err, BrowseError::Input(_)));
    }

    #[test]
    fn key_release_does_not_render() {
        let mut state = AppState::with_records(vec![]);
        let event = Event::Key(Some(KeyEvent::release(Key::Down)));
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
    }

    const VIM_DETAILS: &str = "\
homepage: https://www.vim.org
license: Vim
maintainer: Void Maintainer <void@example.org>
pkgver: vim-9.0_1
repository: https://repo-default.voidlinux.org/current
short_desc: Vi IMproved
";

    fn loaded_remote_state() -> (AppState, Vec<Action>) {
        let mut state = remote_state();
        let event = Event::RecordsFetched {
            origin: Origin::Remote,
            output: "[-] vim-9.0_1   Vi IMproved\n[-] nano-7.2_1  GNU nano\n".to_string(),
        };
        let (_, actions) = handle_event(&mut state, &event).unwrap();
        (state, actions)
    }

    fn detail_lines(state: &AppState) -> Vec<String> {
        let Details::Record(info) = state.compute_viewmodel(24, 80).details else {
            panic!("expected record details");
        };
        info.fields
            .iter()
            .map(|f| format!("{}: {}", f.label, f.value))
            .collect()
    }

    #[test]
    fn remote_load_looks_up_the_selected_package() {
        let (_, actions) = loaded_remote_state();
        assert_eq!(
            actions,
            vec![Action::FetchDetails {
                index: 0,
                command: vec!["xbps-query", "-R", "-S", "vim"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }]
        );
    }

    #[test]
    fn fetched_details_fill_the_detail_pane() {
        let (mut state, _) = loaded_remote_state();
        assert!(detail_lines(&state).contains(&"Homepage: N/A".to_string()));

        let event = Event::DetailsFetched {
            index: 0,
            output: VIM_DETAILS.to_string(),
        };
        let (render, actions) = handle_event(&mut state, &event).unwrap();
        assert!(render);
        assert!(actions.is_empty());

        let lines = detail_lines(&state);
        assert!(lines.contains(&"Homepage: https://www.vim.org".to_string()), "{lines:?}");
        assert!(
            lines.contains(&"Repository: https://repo-default.voidlinux.org/current".to_string()),
            "{lines:?}"
        );
        assert!(lines.contains(&"License: Vim".to_string()));
    }

    #[test]
    fn details_are_requested_once_per_record() {
        let (mut state, _) = loaded_remote_state();
        let (_, actions) = handle_event(&mut state, &key(Key::Down)).unwrap();
        assert!(matches!(actions.as_slice(), [Action::FetchDetails { index: 1, .. }]));

        // Back on a record whose lookup is still in flight.
        let (_, actions) = handle_event(&mut state, &key(Key::Up)).unwrap();
        assert!(actions.is_empty());

        let event = Event::DetailsFailed {
            index: 1,
            error: "exit status 2".to_string(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        let (_, actions) = handle_event(&mut state, &key(Key::Down)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn unrequested_details_are_dropped() {
        let (mut state, _) = loaded_remote_state();
        let event = Event::DetailsFetched {
            index: 1,
            output: VIM_DETAILS.to_string(),
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
        assert!(state.details(1).is_none());
    }

    #[test]
    fn local_records_need_no_lookup() {
        let mut state = AppState::with_records(vec![
            Record::new(Origin::Local, "zsh-5.9_1", "Z shell"),
            Record::new(Origin::Local, "bash-5.2_1", "GNU Bourne Again Shell"),
        ]);
        let (_, actions) = handle_event(&mut state, &key(Key::Down)).unwrap();
        assert!(actions.is_empty());
    }
}
