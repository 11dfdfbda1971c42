//! Root CLI structure for nucam-rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::convert::ConvertArgs;

#[derive(Parser)]
#[command(name = "nucam-rs")]
#[command(about = "Inspect and convert per-frame camera exports", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display tracks, camera and reference actors of an export
    Info {
        /// Path to the JSON export
        file: PathBuf,

        /// Show every reconstructed frame
        #[arg(short, long)]
        detailed: bool,
    },

    /// Convert a track into keyframes in the target convention
    Convert(ConvertArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
