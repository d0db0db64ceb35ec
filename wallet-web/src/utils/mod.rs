//! Utilities for the wallet widget

pub mod constants;
pub mod format;
