//! pagecheck CLI - load a page, run its test suite, report via exit code.
//!
//! This crate provides the command-line harness around `pagecheck-browser`.
//! One invocation performs a single load-evaluate-report cycle:
//!
//! 1. parse exactly one target-URL argument,
//! 2. relay every console message the page emits to stdout, verbatim and in
//!    emission order,
//! 3. load the target address (no timeout, no retry),
//! 4. invoke the in-page suite entry point and read its failure count,
//! 5. exit `0` if the count is zero, `1` otherwise.
//!
//! Usage errors, load failures, and test failures all exit `1`; the causes
//! are distinguished only by the message on stdout.
//!
//! # Modules
//!
//! - [`cli`] - clap argument definitions
//! - [`harness`] - the load-evaluate-report cycle and outcome mapping
//! - [`logger`] - tracing setup (stderr, so stdout stays clean)
//! - [`error`] - CLI-level error type

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod harness;
pub mod logger;

pub use cli::Cli;
pub use error::{CliError, Result};
pub use harness::{Outcome, SUITE_ENTRY, run};
