//! Error type shared by the fetch, scrape and download paths.

use thiserror::Error;

/// Everything that can go wrong during a reading session.
///
/// Only a handful of these are fatal. [`NewsError::UnknownSource`] and
/// [`NewsError::IndexOutOfRange`] are reported to the user and followed by a
/// fresh prompt; the rest propagate up to `main`.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("no news source with id {0}")]
    UnknownSource(i64),

    #[error("article index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status code {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("could not parse feed: {0}")]
    FeedParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("standard input closed")]
    InputClosed,
}

impl NewsError {
    /// True for failures that came from the remote side rather than local I/O.
    pub fn is_network(&self) -> bool {
        matches!(self, NewsError::Network(_) | NewsError::HttpStatus { .. })
    }
}
