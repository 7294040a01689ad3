//! Command-line interface definition for Garcom
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the guided conversation, menu listing, and
//! flow diagnostics.

use clap::{Parser, Subcommand};

/// Garcom - guided dining-suggestion assistant
///
/// Walk a short conversation about what you feel like eating and get a
/// dish suggestion from the restaurant backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "garcom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the backend base URL
    #[arg(long, env = "GARCOM_API_BASE")]
    pub api_base: Option<String>,

    /// Override the selected restaurant id
    #[arg(short, long, env = "GARCOM_RESTAURANT_ID")]
    pub restaurant: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Garcom
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive guided conversation
    Chat,

    /// List the dishes of the selected restaurant
    Menu {
        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show flow-table diagnostics
    Stats {
        /// Emit raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check flow-table invariants and exit non-zero on violations
    Validate,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
