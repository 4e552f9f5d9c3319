//! The seam between the harness and the browser.
//!
//! The harness performs exactly one load-evaluate-report cycle. It does so
//! against [`PageDriver`] rather than a concrete page, so the cycle's
//! decision logic can be exercised with scripted fakes while [`crate::Page`]
//! provides the production implementation.

use crate::error::Result;
use async_trait::async_trait;

/// Completion status of a page load.
///
/// Collaborator-side failures (navigation refused, connection dropped) are
/// folded into [`LoadStatus::Failure`]: a load that does not succeed is an
/// expected outcome for the harness, not an error to propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The page loaded and reported itself ready.
    Success,
    /// The page could not be loaded; carries the collaborator's reason.
    Failure(String),
}

impl LoadStatus {
    /// Returns true for [`LoadStatus::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, LoadStatus::Success)
    }
}

/// A loaded-page capability the harness can drive.
///
/// The trait is object-safe; the harness holds a `&dyn PageDriver`.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Loads the target address and resolves with its completion status.
    ///
    /// The returned future has no timeout: it resolves whenever the
    /// collaborator signals completion, however long that takes.
    async fn load(&self, url: &str) -> LoadStatus;

    /// Evaluates `script` in the loaded page and interprets its completion
    /// value as an integer failure count (0 = all tests passed).
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails or the completion value is not
    /// an integer.
    async fn failure_count(&self, script: &str) -> Result<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_status_classification() {
        assert!(LoadStatus::Success.is_success());
        assert!(!LoadStatus::Failure("net::ERR_CONNECTION_REFUSED".into()).is_success());
    }
}
