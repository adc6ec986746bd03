//! Paragraph scraping for a single article page.
//!
//! Every `<p>` element in the page is printed as one line of plain text,
//! in document order, with runs of whitespace collapsed to a single space.

use crate::error::NewsError;
use crate::models::Article;
use crate::transport::Transport;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::io::Write;
use tracing::{error, info, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Visible text of every non-empty paragraph, in document order.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let paragraph = Selector::parse("p").expect("static selector");

    document
        .select(&paragraph)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Strip markup from an HTML fragment such as a feed description.
pub fn plain_text(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    collapse_whitespace(&html.root_element().text().collect::<String>())
}

/// Fetch the article page and print its paragraphs to `out`.
///
/// A failed fetch is logged and yields no output rather than ending the
/// session. Returns the number of paragraphs printed.
#[instrument(level = "info", skip_all, fields(link = %article.link))]
pub async fn view<T, W>(transport: &T, article: &Article, out: &mut W) -> Result<usize, NewsError>
where
    T: Transport,
    W: Write,
{
    let html = match transport.get_text(&article.link).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Article fetch failed; nothing to show");
            return Ok(0);
        }
    };

    let paragraphs = extract_paragraphs(&html);
    for text in &paragraphs {
        writeln!(out, "{text}")?;
    }
    out.flush()?;

    info!(count = paragraphs.len(), "Printed article paragraphs");
    Ok(paragraphs.len())
}
