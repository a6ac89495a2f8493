//! CLI error type.

use thiserror::Error;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("command '{0}' needs a node label")]
    MissingLabel(&'static str),
    #[error("no node labelled '{0}'")]
    NoSuchNode(String),
}
