//! Shared utilities for the nucam-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
