//! # pagecheck-browser
//!
//! The collaborator layer of the pagecheck harness, built on chromiumoxide.
//!
//! This crate launches headless Chromium, opens pages, forwards in-page
//! console output to a pluggable sink, and evaluates scripts inside the
//! loaded page. The harness itself never talks to the browser directly; it
//! drives the [`PageDriver`] trait, for which [`Page`] is the production
//! implementation.
//!
//! ## Architecture
//!
//! - **HeadlessBrowser**: manages the Chromium process lifecycle
//! - **Page**: a browser tab with load and script evaluation
//! - **ConsoleSink**: destination for relayed console messages
//! - **StdoutRelay / ConsoleCapture**: sink implementations (verbatim relay
//!   and ordered accumulation)
//! - **PageDriver**: the seam the harness runs against
//!
//! ## Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use pagecheck_browser::{BrowserConfig, HeadlessBrowser, LoadStatus, StdoutRelay};
//!
//! let browser = HeadlessBrowser::launch(BrowserConfig::default()).await?;
//! let page = browser.new_page(Arc::new(StdoutRelay)).await?;
//!
//! match page.load("http://localhost:3000/suite.html").await {
//!     LoadStatus::Success => {
//!         let failures: i64 = page.evaluate("suite.run()").await?;
//!         assert_eq!(failures, 0);
//!     }
//!     LoadStatus::Failure(reason) => eprintln!("load failed: {reason}"),
//! }
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover sink accumulation, level classification, and the polling
//! helper. Integration tests in `tests/` drive a real Chromium and are marked
//! `#[ignore]`; run them with `cargo test -p pagecheck-browser -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod console;
pub mod driver;
pub mod error;
pub mod page;
pub mod wait;

// Re-export main types for convenience
pub use browser::{BrowserConfig, HeadlessBrowser};
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage, ConsoleSink, StdoutRelay};
pub use driver::{LoadStatus, PageDriver};
pub use error::{BrowserError, Result};
pub use page::Page;
pub use wait::DEFAULT_POLL_INTERVAL;
