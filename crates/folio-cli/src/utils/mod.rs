//! Small helpers for interactive use.

pub mod input;
