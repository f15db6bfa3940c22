//! Input dispatcher.
//!
//! Maps a logical key event plus the current focus to a state change and a
//! [`Dispatch`] result. Rules apply in priority order:
//!
//! 1. Key release → [`Dispatch::Continue`], nothing changes.
//! 2. Escape → [`Dispatch::Exit`].
//! 3. Tab → [`Dispatch::SwitchFocus`]; the caller flips the focus.
//! 4. [`Focus::QueryEdit`]: Enter commits to [`Focus::ListNav`], Backspace
//!    deletes the last character, printable ASCII is appended. Each accepted
//!    query edit re-filters the list.
//! 5. [`Focus::ListNav`]: Up/`k`, Down/`j`, `PageUp` and `PageDown` move the
//!    selection.
//!
//! A missing event yields [`Dispatch::Error`].

use super::modes::Focus;
use super::state::AppState;

/// Logical key, decoded from the host's key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Tab,
    Escape,
    /// Any key the browser has no binding for.
    Other,
}

/// Whether the key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    #[default]
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub kind: KeyKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn press(key: Key) -> Self {
        Self {
            key,
            kind: KeyKind::Press,
        }
    }

    #[must_use]
    pub const fn release(key: Key) -> Self {
        Self {
            key,
            kind: KeyKind::Release,
        }
    }

    #[must_use]
    pub fn is_press(&self) -> bool {
        self.kind == KeyKind::Press
    }
}

/// Outcome of dispatching one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The user asked to leave.
    Exit,
    /// The caller must toggle focus.
    SwitchFocus,
    /// Keep running.
    Continue,
    /// The input source delivered nothing; the session cannot go on.
    Error,
}

/// Applies one key event to the state.
///
/// # Example
///
/// ```rust
/// use xbps_browse::app::{dispatch, AppState, Dispatch, Key, KeyEvent};
///
/// let mut state = AppState::default();
/// assert_eq!(dispatch(&mut state, Some(&KeyEvent::press(Key::Tab))), Dispatch::SwitchFocus);
/// assert_eq!(dispatch(&mut state, None), Dispatch::Error);
/// ```
pub fn dispatch(state: &mut AppState, event: Option<&KeyEvent>) -> Dispatch {
    let Some(event) = event else {
        return Dispatch::Error;
    };

    let _span = tracing::trace_span!("dispatch", key = ?event.key, focus = ?state.focus).entered();

    if !event.is_press() {
        return Dispatch::Continue;
    }

    match event.key {
        Key::Escape => return Dispatch::Exit,
        Key::Tab => return Dispatch::SwitchFocus,
        _ => {}
    }

    match state.focus {
        Focus::QueryEdit => edit_query(state, event.key),
        Focus::ListNav => navigate(state, event.key),
    }

    Dispatch::Continue
}

fn edit_query(state: &mut AppState, key: Key) {
    match key {
        Key::Enter => state.focus = Focus::ListNav,
        Key::Backspace => {
            state.pop_query_char();
        }
        Key::Char(c) => {
            if !state.push_query_char(c) {
                tracing::trace!(char = ?c, "query edit ignored");
            }
        }
        _ => {}
    }
}

fn navigate(state: &mut AppState, key: Key) {
    match key {
        Key::Down | Key::Char('j') => state.move_down(),
        Key::Up | Key::Char('k') => state.move_up(),
        Key::PageDown => state.page_down(),
        Key::PageUp => state.page_up(),
        _ => {}
    }
}
