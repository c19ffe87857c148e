//! Error types for the command line tool.
//!
//! Wraps pipeline errors together with CLI, IO and serialization failures.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic bundler errors (source collection, filesystem)
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Embedding pipeline errors
    #[error("{0}")]
    Embed(#[from] crate::bundler::EmbedError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
