//! Readiness polling for page loads.
//!
//! A load is only complete once the document reports itself ready, so the
//! page layer polls a condition at a fixed interval. The wait carries no
//! deadline: the harness blocks on load completion for as long as the
//! browser takes, and has no cancellation path.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `condition` at `interval` until it reports true.
///
/// A condition that returns an error counts as not-ready and polling
/// continues; transient CDP failures during navigation are expected while
/// the page is still settling.
pub async fn wait_until<F, Fut>(condition: F, interval: Duration, description: &str)
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    loop {
        match condition().await {
            Ok(true) => return,
            Ok(false) => {}
            Err(err) => {
                tracing::trace!("condition '{description}' not ready: {err}");
            }
        }

        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn returns_immediately_when_condition_holds() {
        wait_until(
            || async { Ok(true) },
            DEFAULT_POLL_INTERVAL,
            "test condition",
        )
        .await;
    }

    #[tokio::test]
    async fn polls_until_condition_holds() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        wait_until(
            move || {
                let c = counter_clone.clone();
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    Ok(count >= 3)
                }
            },
            Duration::from_millis(5),
            "counter >= 3",
        )
        .await;

        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn treats_errors_as_not_ready() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        wait_until(
            move || {
                let c = counter_clone.clone();
                async move {
                    let count = c.fetch_add(1, Ordering::SeqCst);
                    if count < 2 {
                        Err(BrowserError::EvaluationFailed("page settling".into()))
                    } else {
                        Ok(true)
                    }
                }
            },
            Duration::from_millis(5),
            "recovers after errors",
        )
        .await;

        assert!(counter.load(Ordering::SeqCst) >= 2);
    }
}
