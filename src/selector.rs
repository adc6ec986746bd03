//! Numbered article listing and bounds-checked selection.

use crate::error::NewsError;
use crate::models::Article;
use std::io::{self, Write};

/// Turn a parsed feed into the list the user picks from.
///
/// Display indices are positions in this list, so the feed order is kept
/// exactly as parsed.
pub fn index(document: Vec<Article>) -> Vec<Article> {
    document
}

/// Print `(<index>) <title>` for every article.
pub fn display<W: Write>(articles: &[Article], out: &mut W) -> io::Result<()> {
    for (i, article) in articles.iter().enumerate() {
        writeln!(out, "({i}) {}", article.title)?;
    }
    Ok(())
}

/// Zero-based lookup that reports out-of-range indices instead of panicking.
pub fn select(articles: &[Article], index: i64) -> Result<&Article, NewsError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| articles.get(i))
        .ok_or(NewsError::IndexOutOfRange {
            index,
            len: articles.len(),
        })
}
