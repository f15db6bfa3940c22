//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! The whole frame is returned as one string; the plugin shim prints it.
//!
//! # Example
//!
//! ```rust
//! use xbps_browse::app::AppState;
//! use xbps_browse::domain::{Origin, Record};
//! use xbps_browse::ui::render;
//!
//! let state = AppState::with_records(vec![Record::new(Origin::Local, "zsh-5.9_1", "Z shell")]);
//! let frame = render(&state, 24, 80);
//! assert!(frame.contains("zsh-5.9_1"));
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI for a `rows` x `cols` pane.
///
/// Every row of the pane is written, so the previous frame never shows
/// through.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = String::with_capacity(rows * cols * 2);
    components::render_layout(&mut frame, &viewmodel, &state.theme, cols);
    frame
}
