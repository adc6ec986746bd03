//! Raw article download.
//!
//! The article page is streamed as-is into `<title>.html`. Existing files
//! with the same name are overwritten.

use crate::error::NewsError;
use crate::models::Article;
use crate::transport::Transport;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tracing::{info, instrument, warn};

/// File name for a downloaded article.
///
/// The title is used verbatim with `.html` appended unless it already ends
/// in `.html`. Path separators become `_` so the file always lands directly
/// in the download directory.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(download_filename("Breaking News"), "Breaking News.html");
/// assert_eq!(download_filename("Report.html"), "Report.html");
/// ```
pub fn download_filename(title: &str) -> String {
    let name: String = title
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let name = if name.is_empty() {
        "untitled".to_string()
    } else {
        name
    };

    if name.ends_with(".html") {
        name
    } else {
        format!("{name}.html")
    }
}

/// Save the page behind `article.link` into `dir`.
///
/// `dir` is created on first use; nothing touches the file system until a
/// download is actually requested.
///
/// # Errors
///
/// - [`NewsError::Io`] if the directory or file cannot be created or written
/// - [`NewsError::Network`] / [`NewsError::HttpStatus`] if the fetch fails
///
/// When anything fails after the file was created, the partial file is
/// removed before the error is returned.
#[instrument(level = "info", skip_all, fields(link = %article.link))]
pub async fn download<T: Transport>(
    transport: &T,
    article: &Article,
    dir: &Path,
) -> Result<PathBuf, NewsError> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(download_filename(&article.title));
    let mut file = File::create(&path).await?;

    let result = transport.copy_to(&article.link, &mut file).await;
    drop(file);

    match result {
        Ok(bytes) => {
            info!(path = %path.display(), bytes, "Saved article");
            Ok(path)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Download failed; removing partial file");
            if let Err(rm) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %rm, "Could not remove partial file");
            }
            Err(e)
        }
    }
}
