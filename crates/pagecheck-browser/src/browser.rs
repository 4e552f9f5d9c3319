//! Browser lifecycle management and process control.
//!
//! `HeadlessBrowser` launches Chromium, holds the CDP connection, and opens
//! pages. The CDP handler stream is driven on a background task for the life
//! of the browser.
//!
//! # Resource Safety
//!
//! `HeadlessBrowser` implements Drop so the Chrome process is killed even if
//! the caller panics, but explicit cleanup via `close()` is preferred for
//! graceful shutdown.

use crate::console::ConsoleSink;
use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a browser.
///
/// Defaults are tuned for headless runs in CI containers; `visible()` and
/// `with_chrome_path()` cover local debugging.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = `CHROME_BIN` env var, then auto-detect).
    pub chrome_path: Option<PathBuf>,
}

impl BrowserConfig {
    /// Creates a new config with defaults for headless runs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Sets the Chrome executable to launch.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Converts to chromiumoxide's browser configuration.
    fn to_cdp_config(&self) -> Result<CdpBrowserConfig> {
        let mut config = CdpBrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        // Unique user data directory per instance, so parallel runs don't
        // trip Chrome's ProcessSingleton lock.
        let unique_id = uuid::Uuid::new_v4();
        let user_data_dir = std::env::temp_dir().join(format!("pagecheck-{unique_id}"));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        let chrome_path = self
            .chrome_path
            .clone()
            .or_else(|| std::env::var_os("CHROME_BIN").map(PathBuf::from));
        if let Some(path) = chrome_path {
            config = config.chrome_executable(path);
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Required when user namespaces are unavailable (common in
                // containers). Only safe because the harness loads pages the
                // caller already trusts.
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed headless browser instance.
///
/// Wraps the Chromium process, drives its CDP event stream, and opens pages.
///
/// # Example
///
/// ```ignore
/// let browser = HeadlessBrowser::launch(BrowserConfig::default()).await?;
/// let page = browser.new_page(Arc::new(StdoutRelay)).await?;
/// let status = page.load("https://example.com").await;
/// browser.close().await?;
/// ```
pub struct HeadlessBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
}

impl HeadlessBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// Spawns a Chrome process, establishes the CDP connection, and starts a
    /// background task that drives the chromiumoxide handler stream.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::LaunchFailed`] if Chrome is not installed,
    /// not executable, or fails to start.
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        debug!("launching browser with config: {:?}", config);

        let cdp_config = config.to_cdp_config()?;

        let (browser, mut handler) =
            Browser::launch(cdp_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only processes CDP events while the handler stream
        // is being polled.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {}", e);
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
        })
    }

    /// Opens a new page (tab) with `sink` registered for its console output.
    ///
    /// The sink receives every console message the page emits, in emission
    /// order, from this point until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::AlreadyClosed`] if the browser has been
    /// closed, or [`BrowserError::ConnectionFailed`] if the tab cannot be
    /// created.
    pub async fn new_page(&self, sink: Arc<dyn ConsoleSink>) -> Result<Page> {
        let browser = self.inner.lock().await;

        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(chrome_page, sink))
    }

    /// Closes the browser and kills the Chrome process.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(self) -> Result<()> {
        let mut browser_guard = self.inner.lock().await;

        if let Some(mut browser) = browser_guard.take() {
            debug!("closing browser");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for HeadlessBrowser {
    fn drop(&mut self) {
        // Drop is synchronous, so graceful close is impossible here;
        // chromiumoxide's Browser::drop kills the Chrome process if close()
        // was never called.
        if self.inner.try_lock().map(|g| g.is_some()).unwrap_or(false) {
            warn!("HeadlessBrowser dropped without explicit close() - forcing shutdown via Drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleCapture;

    #[test]
    fn config_defaults_are_headless() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
    }

    #[test]
    fn config_builders_compose() {
        let config = BrowserConfig::new()
            .visible()
            .with_window_size(800, 600)
            .with_chrome_path("/usr/bin/chromium");

        assert!(!config.headless);
        assert_eq!(config.window_size, (800, 600));
        assert_eq!(
            config.chrome_path,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close() {
        let browser = HeadlessBrowser::launch(BrowserConfig::default())
            .await
            .expect("failed to launch browser");

        assert!(!browser.is_closed().await);

        browser.close().await.expect("failed to close browser");
    }

    #[tokio::test]
    #[ignore]
    async fn browser_create_page() {
        let browser = HeadlessBrowser::launch(BrowserConfig::default())
            .await
            .expect("failed to launch");

        let page = browser
            .new_page(Arc::new(ConsoleCapture::new()))
            .await
            .expect("failed to create page");

        assert!(page.load("about:blank").await.is_success());

        browser.close().await.expect("failed to close");
    }
}
