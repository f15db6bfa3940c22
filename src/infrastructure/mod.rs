//! Sandbox environment helpers.

pub mod paths;

pub use paths::{data_dir, expand_tilde, HOST_ROOT};
