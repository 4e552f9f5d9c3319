//! Command-line interface definition for the pagecheck harness.
//!
//! The contract is narrow: exactly one positional argument, the target URL.
//! Zero arguments or more than one is a usage error that must exit `1`
//! without a load attempt, so `main` uses [`clap::Parser::try_parse`] and
//! maps parse failures itself instead of letting clap exit with its default
//! code.

use clap::Parser;
use std::path::PathBuf;

/// The usage line printed when the target URL argument is missing or
/// supernumerary.
pub const USAGE_ERROR: &str = "Expected a target URL parameter.";

/// pagecheck - run an in-page test suite under headless Chrome
#[derive(Parser, Debug)]
#[command(
    name = "pagecheck",
    version,
    about = "Load a page in headless Chrome, run its test suite, report via exit code",
    long_about = "pagecheck loads the given URL in headless Chrome, relays the page's\n\
                  console output to stdout, invokes the page's test-suite entry point,\n\
                  and exits 0 when the suite reports zero failures and 1 otherwise."
)]
pub struct Cli {
    /// Target URL whose page exposes the test-suite entry point
    #[arg(value_name = "URL")]
    pub url: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Chrome executable to launch (defaults to CHROME_BIN, then auto-detect)
    #[arg(long, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_url() {
        let cli = Cli::try_parse_from(["pagecheck", "http://example.test/suite.html"])
            .expect("one URL should parse");
        assert_eq!(cli.url, "http://example.test/suite.html");
        assert!(!cli.visible);
        assert!(cli.chrome.is_none());
    }

    #[test]
    fn rejects_missing_url() {
        assert!(Cli::try_parse_from(["pagecheck"]).is_err());
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(
            Cli::try_parse_from(["pagecheck", "http://a.test/", "http://b.test/"]).is_err()
        );
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(
            Cli::try_parse_from(["pagecheck", "--verbose", "--quiet", "http://a.test/"]).is_err()
        );
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "pagecheck",
            "--chrome",
            "/usr/bin/chromium",
            "--visible",
            "http://a.test/",
        ])
        .expect("flags should parse");
        assert_eq!(cli.chrome, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(cli.visible);
    }
}
