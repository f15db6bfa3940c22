//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled frames through
//! composable rendering components. It provides theme support, a split
//! list/detail layout and query match highlighting.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types and the screen layout
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailField, DetailInfo, Details, DisplayItem, EmptyState, FooterInfo, HeaderInfo, Layout,
    QueryBarInfo, ScrollHints, UIViewModel,
};
