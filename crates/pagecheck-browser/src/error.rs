//! Error types for the browser collaborator layer.
//!
//! Failure modes are split by operation: launching the browser, holding the
//! CDP connection, and evaluating scripts. Load failures are
//! deliberately NOT represented here: a load that does not succeed is an
//! expected outcome and surfaces as [`crate::LoadStatus::Failure`] instead
//! of an error.

use thiserror::Error;

/// The main error type for browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// Typically means Chrome/Chromium is not installed or not executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or keep the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Script evaluation in the page context failed.
    #[error("script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
