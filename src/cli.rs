//! Command-line interface definitions for collective.
//!
//! Every option has a default, so running the binary with no arguments
//! starts the interactive session straight away.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Plain interactive session, downloads land in the current directory
/// collective
///
/// # Save downloads elsewhere and log debug output to stderr
/// collective --download-dir ~/news -v
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory downloaded articles are written to
    #[arg(short, long, env = "COLLECTIVE_DOWNLOAD_DIR", default_value = ".")]
    pub download_dir: PathBuf,

    /// User-Agent header sent with every request
    #[arg(long, default_value = concat!("collective/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// Log at debug level (RUST_LOG takes precedence when set)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["collective"]);
        assert_eq!(cli.download_dir, PathBuf::from("."));
        assert!(cli.user_agent.starts_with("collective/"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["collective", "-d", "/tmp/news", "-v"]);
        assert_eq!(cli.download_dir, PathBuf::from("/tmp/news"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_user_agent() {
        let cli = Cli::parse_from(["collective", "--user-agent", "reader/1.0"]);
        assert_eq!(cli.user_agent, "reader/1.0");
    }
}
