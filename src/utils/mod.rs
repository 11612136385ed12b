//! Shared helpers for rendering and output.

pub mod date;
pub mod escape;
pub mod log;
pub mod minify;
