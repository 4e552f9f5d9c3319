//! The load-evaluate-report cycle.
//!
//! One call to [`run`] is one harness invocation: load the target address,
//! invoke the in-page suite entry point, write the status line, and return
//! the terminal [`Outcome`]. There is no retry, no timeout, and no second
//! cycle; every path through this module is terminal.
//!
//! The cycle runs against [`PageDriver`] so it can be exercised with
//! scripted fakes; console relay is wired separately, when the page is
//! opened, and flows to the output stream as messages arrive.

use crate::error::Result;
use pagecheck_browser::{LoadStatus, PageDriver};
use std::io::Write;
use tracing::{debug, warn};

/// The in-page routine that runs the suite and returns its failure count.
pub const SUITE_ENTRY: &str = "inflections.test.run()";

/// Terminal state of one harness invocation.
///
/// The usage-error path never reaches [`run`]; it is handled at argument
/// parsing, before a browser exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The collaborator reported a non-success load status.
    LoadFailed,
    /// The suite entry point returned a non-zero count or failed to run.
    SuiteFailed,
    /// The suite entry point returned zero.
    Passed,
}

impl Outcome {
    /// Maps the outcome to the process exit code.
    ///
    /// All failure causes collapse to `1`; only a passing suite exits `0`.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Passed => 0,
            Outcome::LoadFailed | Outcome::SuiteFailed => 1,
        }
    }
}

/// Runs one load-evaluate-report cycle against `driver`.
///
/// Status lines go to `out`. A non-success load short-circuits: no
/// evaluation is attempted. An entry point that is missing or throws counts
/// as a failed suite; the page did load, so the load-failure message would
/// be misleading.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub async fn run(driver: &dyn PageDriver, url: &str, out: &mut dyn Write) -> Result<Outcome> {
    debug!("loading {url}");

    match driver.load(url).await {
        LoadStatus::Failure(reason) => {
            debug!("load failed: {reason}");
            writeln!(out, "Failed to open {url}")?;
            Ok(Outcome::LoadFailed)
        }
        LoadStatus::Success => match driver.failure_count(SUITE_ENTRY).await {
            Ok(0) => {
                writeln!(out, "Tests succeeded.")?;
                Ok(Outcome::Passed)
            }
            Ok(failures) => {
                debug!("suite reported {failures} failing tests");
                writeln!(out, "*** Tests failed! ***")?;
                Ok(Outcome::SuiteFailed)
            }
            Err(err) => {
                warn!("suite entry point did not complete: {err}");
                writeln!(out, "*** Tests failed! ***")?;
                Ok(Outcome::SuiteFailed)
            }
        },
    }
}
