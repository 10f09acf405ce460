//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that parse CLI-specific input, call the core services
//!   and format output for the terminal.
//!
//! Handlers never touch repositories directly.

pub mod add;
pub mod edit;
pub mod image_url;
pub mod list;
pub mod remove;
pub mod show;
pub mod tag;
pub mod tags;
pub mod timeline;
pub mod upload;
