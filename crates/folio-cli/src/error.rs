//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use folio_core::{CoreError, RepositoryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Admin password missing or wrong.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The addressed item or entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 64,    // EX_USAGE
            Self::NotFound(_) => 66,     // EX_NOINPUT
            Self::Backend(_) => 69,      // EX_UNAVAILABLE
            Self::Io(_) => 74,           // EX_IOERR
            Self::Unauthorized(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,       // EX_CONFIG
        }
    }

    /// Exit code for an error returned by a handler.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        if let Some(cli) = err.downcast_ref::<Self>() {
            return cli.exit_code();
        }
        if let Some(core) = err.downcast_ref::<CoreError>() {
            return Self::from(core.clone()).exit_code();
        }
        if err.downcast_ref::<std::io::Error>().is_some() {
            return Self::Io(String::new()).exit_code();
        }
        1
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(what)) => Self::NotFound(what),
            CoreError::Repository(repo_err) => Self::Backend(repo_err.to_string()),
            CoreError::Storage(storage_err) => Self::Backend(storage_err.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Unauthorized(msg) => Self::Unauthorized(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
