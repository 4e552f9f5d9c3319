//! Logging setup for the pagecheck harness.
//!
//! Structured logging via the `tracing` ecosystem. Everything goes to
//! stderr: stdout carries only the harness contract (relayed console
//! messages and the status line), so it must stay free of log noise.
//!
//! Verbosity resolution order: `--verbose` (debug for pagecheck crates),
//! `--quiet` (errors only), `RUST_LOG`, then an info-level default.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// Call once at startup, before any logging occurs.
pub fn init(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("pagecheck_cli=debug,pagecheck_browser=debug")
    } else if quiet {
        EnvFilter::new("pagecheck_cli=error,pagecheck_browser=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pagecheck_cli=info,pagecheck_browser=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // only cover filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _filter = EnvFilter::new("pagecheck_cli=debug,pagecheck_browser=debug");
    }

    #[test]
    fn quiet_filter_parses() {
        let _filter = EnvFilter::new("pagecheck_cli=error,pagecheck_browser=error");
    }
}
