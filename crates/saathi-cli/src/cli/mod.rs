//! CLI argument definitions and command handlers.

pub mod chat;
pub mod listing;
pub mod sessions;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// Saathi -- AI copilot for online sellers.
#[derive(Parser)]
#[command(name = "saathi", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive copilot chat
    Chat {
        /// Reply language: english, hindi, or hinglish
        #[arg(long, env = "SAATHI_LANGUAGE", default_value = "hinglish")]
        language: String,
    },

    /// List past chat sessions
    Sessions,

    /// Generate a product listing from a description, category, and photo
    Listing {
        #[arg(long)]
        description: String,

        #[arg(long)]
        category: String,

        /// Path to the product photo
        #[arg(long)]
        image: PathBuf,
    },

    /// Translate a listing title and description
    Translate {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Target language, e.g. "hindi"
        #[arg(long)]
        language: String,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
