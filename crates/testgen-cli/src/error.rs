//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--all` nor `--file` was given
    #[error("No input selected: pass --all or --file <name>...")]
    NoInputSelected,

    /// One or more inputs failed; each was reported as it happened
    #[error("{failed} of {total} input(s) failed")]
    BatchFailed {
        /// Failed inputs
        failed: usize,
        /// Inputs processed
        total: usize,
    },

    /// Logging setup failed
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// testgen library error
    #[error(transparent)]
    Testgen(#[from] testgen::TestgenError),
}

impl CliError {
    /// Create a logging error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
