//! CLI-level error type.
//!
//! Only collaborator setup (launch, tab creation) and output-stream writes
//! can surface here; the load-failed and tests-failed paths are outcomes,
//! not errors (see [`crate::harness::Outcome`]).

use thiserror::Error;

/// Errors the harness can hit before or while running the cycle.
#[derive(Debug, Error)]
pub enum CliError {
    /// The browser collaborator failed (launch, tab creation).
    #[error(transparent)]
    Browser(#[from] pagecheck_browser::BrowserError),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
