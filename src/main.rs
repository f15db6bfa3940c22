//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the xbps-browse library and the Zellij
//! plugin system: host events become library [`Event`]s, library
//! [`Action`]s become host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`,
//!    request `RunCommands`
//! 2. **Permission Granted**: Run the data source command on the host
//! 3. **Command Result**: Hand stdout to the library, which parses it
//! 4. **Update**: Translate keys, delegate to the library
//! 5. **Render**: Size the viewport, print the frame
//!
//! # Event Mapping
//!
//! - `Key` → `Event::Key` (bare key, press)
//! - `RunCommandResult` exit 0 → `Event::RecordsFetched`, otherwise
//!   `Event::FetchFailed`; routed by the `source` context entry. Results
//!   carrying a `detail` entry become `Event::DetailsFetched` /
//!   `Event::DetailsFailed` for that store index
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `Event::PermissionsDenied`
//!
//! # Keybindings
//!
//! - `Esc`: Close plugin
//! - `Tab`: Switch between list and query
//! - `j`/`Down`, `Ctrl+n`: Move down (list)
//! - `k`/`Up`, `Ctrl+p`: Move up (list)
//! - `PgDn`/`PgUp`: Page (list)
//! - Printable keys, `Backspace`: Edit query (query)
//! - `Enter`: Back to the list (query)

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use xbps_browse::app::{Key, KeyEvent};
use xbps_browse::{handle_event, Action, Config, Event, Origin};

register_plugin!(State);

/// Command context key naming the origin a command belongs to.
const SOURCE_CONTEXT_KEY: &str = "source";

/// Command context key holding the store index of a detail lookup.
const DETAIL_CONTEXT_KEY: &str = "detail";

/// Plugin state wrapper.
struct State {
    app: xbps_browse::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: xbps_browse::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        xbps_browse::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(origin = %config.origin, query = %config.query, regex = config.regex, "parsed configuration");
        self.app = xbps_browse::initialize(&config);

        request_permission(&[PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => Event::Key(Some(Self::map_key(key))),
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                match Self::map_command_result(exit_code, stdout, stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    Self::execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "unrecoverable event error, closing");
                close_self();
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport_height(rows);
        print!("{}", xbps_browse::ui::render(&self.app, rows, cols));
    }
}

impl State {
    const fn get_event_name(event: &zellij_tile::prelude::Event) -> &'static str {
        match event {
            zellij_tile::prelude::Event::Key(..) => "Key",
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult",
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult",
            _ => "Other",
        }
    }

    /// Maps a host key to a library key press. Modified keys other than the
    /// `Ctrl+n`/`Ctrl+p` aliases are never typed into the query.
    fn map_key(key: &KeyWithModifier) -> KeyEvent {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return KeyEvent::press(match key.bare_key {
                BareKey::Char('n') => Key::Down,
                BareKey::Char('p') => Key::Up,
                _ => Key::Other,
            });
        }

        KeyEvent::press(match key.bare_key {
            BareKey::Esc => Key::Escape,
            BareKey::Tab => Key::Tab,
            BareKey::Enter => Key::Enter,
            BareKey::Backspace => Key::Backspace,
            BareKey::Up => Key::Up,
            BareKey::Down => Key::Down,
            BareKey::PageUp => Key::PageUp,
            BareKey::PageDown => Key::PageDown,
            BareKey::Char(c) if key.key_modifiers.is_empty() || key.has_modifiers(&[KeyModifier::Shift]) => {
                Key::Char(c)
            }
            _ => Key::Other,
        })
    }

    fn map_command_result(
        exit_code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        if let Some(index) = context.get(DETAIL_CONTEXT_KEY) {
            let index = index.parse::<usize>().ok()?;
            tracing::debug!(index, exit_code = ?exit_code, "detail lookup finished");
            return Some(match Self::command_error(exit_code, &stderr) {
                None => Event::DetailsFetched {
                    index,
                    output: String::from_utf8_lossy(&stdout).into_owned(),
                },
                Some(error) => Event::DetailsFailed { index, error },
            });
        }

        let Some(origin) = context.get(SOURCE_CONTEXT_KEY).and_then(|s| Origin::parse(s)) else {
            tracing::debug!("ignoring command result without a source");
            return None;
        };
        tracing::debug!(origin = %origin, exit_code = ?exit_code, stdout_len = stdout.len(), "command finished");

        Some(match Self::command_error(exit_code, &stderr) {
            None => Event::RecordsFetched {
                origin,
                output: String::from_utf8_lossy(&stdout).into_owned(),
            },
            Some(error) => Event::FetchFailed { origin, error },
        })
    }

    /// Describes a failed command, or `None` when it exited 0.
    fn command_error(exit_code: Option<i32>, stderr: &[u8]) -> Option<String> {
        if exit_code == Some(0) {
            return None;
        }
        let stderr = String::from_utf8_lossy(stderr);
        Some(match (stderr.trim(), exit_code) {
            ("", Some(code)) => format!("exit status {code}"),
            ("", None) => "command did not run".to_string(),
            (message, _) => message.to_string(),
        })
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::Close => close_self(),
            Action::Fetch(request) => {
                let command = request.command();
                let args: Vec<&str> = command.iter().map(String::as_str).collect();
                let mut context = BTreeMap::new();
                context.insert(SOURCE_CONTEXT_KEY.to_string(), request.origin.to_string());
                run_command(&args, context);
            }
            Action::FetchDetails { index, command } => {
                let args: Vec<&str> = command.iter().map(String::as_str).collect();
                let mut context = BTreeMap::new();
                context.insert(DETAIL_CONTEXT_KEY.to_string(), index.to_string());
                run_command(&args, context);
            }
        }
    }
}
