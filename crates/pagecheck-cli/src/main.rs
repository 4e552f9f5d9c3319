//! pagecheck - load a page in headless Chrome, run its suite, exit 0/1.
//!
//! Argument handling, logging setup, and the wiring of the browser
//! collaborator to the harness cycle. All status output goes to stdout;
//! log output goes to stderr.

use clap::Parser;
use clap::error::ErrorKind;
use pagecheck_browser::{BrowserConfig, HeadlessBrowser, StdoutRelay};
use pagecheck_cli::{cli, harness, logger};
use std::io;
use std::process;
use std::sync::Arc;
use tracing::warn;

#[tokio::main]
async fn main() {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            process::exit(0);
        }
        Err(_) => {
            // Wrong argument count or shape: report once, no load attempt,
            // same exit code as every other failure.
            println!("{}", cli::USAGE_ERROR);
            process::exit(1);
        }
    };

    logger::init(args.verbose, args.quiet, args.no_color);

    let code = match run(args).await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            // Collaborator setup failed before the cycle could start.
            println!("{err}");
            1
        }
    };

    process::exit(code);
}

async fn run(args: cli::Cli) -> pagecheck_cli::Result<harness::Outcome> {
    let mut config = BrowserConfig::default();
    if args.visible {
        config = config.visible();
    }
    if let Some(path) = &args.chrome {
        config = config.with_chrome_path(path);
    }

    let browser = HeadlessBrowser::launch(config).await?;
    let page = browser.new_page(Arc::new(StdoutRelay)).await?;

    let outcome = harness::run(&page, &args.url, &mut io::stdout()).await?;

    if let Err(err) = browser.close().await {
        warn!("browser did not close cleanly: {err}");
    }

    Ok(outcome)
}
