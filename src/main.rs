//! # collective
//!
//! An interactive command-line RSS news reader. It prints a fixed menu of
//! news sources, fetches the chosen feed, lists its articles, and then
//! either prints the article's paragraphs or saves the raw page locally.
//!
//! ## Usage
//!
//! ```sh
//! collective
//! ```
//!
//! ## Architecture
//!
//! 1. **Catalog**: the fixed menu of sources ([`catalog`])
//! 2. **Feed**: one GET of the feed URL, parsed into articles ([`feed`])
//! 3. **Selection**: numbered list and bounds-checked pick ([`selector`])
//! 4. **Action**: view ([`scrapers`]) or download ([`outputs`])
//!
//! Everything runs on a single thread, one request at a time.

use clap::Parser;
use std::error::Error;
use std::io;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod actions;
mod catalog;
mod cli;
mod error;
mod feed;
mod models;
mod outputs;
mod prompt;
mod scrapers;
mod selector;
mod session;
mod transport;
mod utils;

use catalog::CATALOG;
use cli::Cli;
use prompt::Prompter;
use transport::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    // stderr keeps log lines out of the menu and article text on stdout
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("collective starting up");
    debug!(?args.download_dir, %args.user_agent, "Parsed CLI arguments");

    let transport = HttpTransport::new(&args.user_agent)?;
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    match session::run(&CATALOG, &transport, &mut prompter, &args.download_dir).await {
        Ok(action) => {
            info!(?action, "Session finished");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, network = e.is_network(), "Session failed");
            Err(e.into())
        }
    }
}
