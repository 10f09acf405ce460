//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the portfolio catalog.
///
/// Global options pick the backend and credentials; subcommands do the work.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Browse and manage a tag-aware portfolio catalog")]
#[command(version)]
pub struct Cli {
    /// Use this SQLite database instead of the configured one
    #[arg(long = "db", global = true)]
    pub db: Option<PathBuf>,

    /// Talk to the hosted REST backend (FOLIO_BACKEND_URL) instead of SQLite
    #[arg(long, global = true)]
    pub remote: bool,

    /// Admin password for commands that change the catalog
    #[arg(
        long,
        global = true,
        env = "FOLIO_ADMIN_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
