//! `folio` command-line adapter.
//!
//! Wires the catalog services to a local `SQLite` database or the hosted
//! REST backend and exposes them as subcommands.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::{ClearField, Commands, DirectionArg, TimelineCommand};
pub use error::CliError;
pub use parser::Cli;
