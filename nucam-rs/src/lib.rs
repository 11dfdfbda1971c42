//! nucam-rs library
//!
//! Command implementations and output helpers behind the `nucam-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
