//! CLI module - Command-line interface for tvbrowse
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;
pub mod screen;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::ShowId;

/// tvbrowse - TV show and episode browser
/// Browse the TVMaze catalog from the terminal
#[derive(Parser)]
#[command(name = "tvbrowse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive browser (default)
    #[command(alias = "b")]
    Browse {
        /// Open this show's episodes instead of the show list
        #[arg(long)]
        show: Option<ShowId>,
    },

    /// Print the show list once
    #[command(alias = "ls")]
    Shows {
        /// Search text applied to names and summaries
        #[arg(long, short)]
        search: Option<String>,
        /// Selection option number, or "all"
        #[arg(long, short)]
        pick: Option<String>,
        /// Print the screen as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the episodes of one show once
    #[command(alias = "eps")]
    Episodes {
        /// TVMaze show ID
        show: ShowId,
        /// Search text applied to names and summaries
        #[arg(long, short)]
        search: Option<String>,
        /// Episode code (S01E02), option number, or "all"
        #[arg(long, short)]
        pick: Option<String>,
        /// Print the screen as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
