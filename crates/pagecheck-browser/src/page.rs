//! Page-level operations: loading and script evaluation.
//!
//! `Page` wraps a chromiumoxide tab. Opening a page starts a listener task
//! that forwards `Runtime.consoleAPICalled` events to the page's
//! [`ConsoleSink`] in arrival order; the listener runs until the process
//! exits.

use crate::console::{ConsoleSink, parse_console_event};
use crate::driver::{LoadStatus, PageDriver};
use crate::error::{BrowserError, Result};
use crate::wait::{DEFAULT_POLL_INTERVAL, wait_until};
use async_trait::async_trait;
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A browser page (tab) the harness can load and script.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    _console_task: JoinHandle<()>,
}

impl Page {
    /// Wraps a chromiumoxide page and starts the console forwarder.
    ///
    /// Called by [`crate::HeadlessBrowser::new_page`]; users don't construct
    /// pages directly.
    pub(crate) fn new(page: ChromePage, sink: Arc<dyn ConsoleSink>) -> Self {
        let page_arc = Arc::new(page);

        let page_for_task = page_arc.clone();
        let console_task = tokio::spawn(async move {
            if let Ok(mut events) = page_for_task
                .event_listener::<EventConsoleApiCalled>()
                .await
            {
                while let Some(event) = events.next().await {
                    sink.emit(parse_console_event(&event));
                }
            }
        });

        Self {
            inner: page_arc,
            _console_task: console_task,
        }
    }

    /// Loads `url` and waits for the document to report itself ready.
    ///
    /// The wait is unbounded: completion is signalled by the browser, never
    /// by a timer. Every collaborator-side failure on this path folds into
    /// [`LoadStatus::Failure`]; for the harness a page that cannot be
    /// opened is a normal outcome, not an exceptional one.
    pub async fn load(&self, url: &str) -> LoadStatus {
        if let Err(e) = self.inner.goto(url).await {
            debug!("navigation to '{url}' failed: {e}");
            return LoadStatus::Failure(e.to_string());
        }

        wait_until(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(serde_json::Value::as_str)
                        .is_some_and(|s| s == "complete"))
                }
            },
            DEFAULT_POLL_INTERVAL,
            "document ready",
        )
        .await;

        LoadStatus::Success
    }

    /// Evaluates JavaScript in the page context and returns the result.
    ///
    /// The script runs in the main world and can access the DOM and globals.
    /// One awaited CDP call; no further suspension points.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails or the completion value cannot
    /// be deserialized into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }
}

#[async_trait]
impl PageDriver for Page {
    async fn load(&self, url: &str) -> LoadStatus {
        Page::load(self, url).await
    }

    async fn failure_count(&self, script: &str) -> Result<i64> {
        self.evaluate(script).await
    }
}
