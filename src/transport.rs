//! HTTP access behind a narrow trait.
//!
//! Feed fetching, scraping and downloading only ever need two things: a page
//! as text, or a page streamed into a writer. [`Transport`] captures exactly
//! that so the rest of the crate can run against [`HttpTransport`] in the
//! binary and an in-memory fake in tests.

use crate::error::NewsError;
use reqwest::Client;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

/// Blocking-in-spirit GET operations.
///
/// Each call issues exactly one request for exactly the given URL. No
/// redirects to other pages are followed beyond what HTTP itself does.
pub trait Transport {
    /// Fetch `url` and return the decoded body.
    async fn get_text(&self, url: &str) -> Result<String, NewsError>;

    /// Fetch `url` and write the raw body into `sink` as it arrives.
    ///
    /// Returns the number of bytes written.
    async fn copy_to<W>(&self, url: &str, sink: &mut W) -> Result<u64, NewsError>
    where
        W: AsyncWrite + Unpin;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, NewsError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, NewsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl Transport for HttpTransport {
    #[instrument(level = "debug", skip(self))]
    async fn get_text(&self, url: &str) -> Result<String, NewsError> {
        let body = self.send(url).await?.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }

    #[instrument(level = "debug", skip(self, sink))]
    async fn copy_to<W>(&self, url: &str, sink: &mut W) -> Result<u64, NewsError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut response = self.send(url).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        debug!(bytes = written, "Streamed page");
        Ok(written)
    }
}
