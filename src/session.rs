//! One interactive reading session.
//!
//! ```text
//! source menu → source prompt → fetch feed → article list → article prompt
//!             → action prompt → view | download
//! ```
//!
//! Bad answers to the source and article prompts are reported and asked
//! again; the action prompt is asked once.

use crate::actions::{self, Action};
use crate::catalog::SourceCatalog;
use crate::error::NewsError;
use crate::feed;
use crate::models::Article;
use crate::prompt::{Choice, Prompter};
use crate::selector;
use crate::transport::Transport;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub const SOURCE_PROMPT: &str = "Select a news source : ";
pub const ARTICLE_PROMPT: &str = "Select an article : ";
pub const INVALID_SELECTION: &str = "Invalid selection";

/// Resolve the user's source choice and fetch that feed.
///
/// Unknown ids and unparseable input print [`INVALID_SELECTION`] and ask
/// again until a known source is picked. Fetch failures are returned.
#[instrument(level = "info", skip_all, fields(first = ?first))]
pub async fn select_and_fetch<T, R, W>(
    catalog: &SourceCatalog,
    transport: &T,
    prompter: &mut Prompter<R, W>,
    first: Choice,
) -> Result<Vec<Article>, NewsError>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let mut choice = first;
    loop {
        match choice {
            Choice::Number(id) => match catalog.resolve(id) {
                Ok(entry) => {
                    info!(id = entry.id, label = entry.label, url = entry.url, "Fetching feed");
                    return feed::fetch(transport, entry.url).await;
                }
                Err(e) => warn!(error = %e, "Unknown source"),
            },
            Choice::Invalid => warn!("Source choice is not a number"),
        }
        writeln!(prompter.output(), "{INVALID_SELECTION}")?;
        choice = prompter.prompt(SOURCE_PROMPT)?;
    }
}

/// Ask for an article index until one is in range.
pub fn choose_article<'a, R, W>(
    articles: &'a [Article],
    prompter: &mut Prompter<R, W>,
) -> Result<&'a Article, NewsError>
where
    R: BufRead,
    W: Write,
{
    loop {
        match prompter.prompt(ARTICLE_PROMPT)? {
            Choice::Number(index) => match selector::select(articles, index) {
                Ok(article) => return Ok(article),
                Err(e) => writeln!(prompter.output(), "{INVALID_SELECTION}: {e}")?,
            },
            Choice::Invalid => writeln!(prompter.output(), "{INVALID_SELECTION}")?,
        }
    }
}

/// Run the whole flow once. Returns the action that was carried out, or
/// `None` when the chosen feed had no articles.
pub async fn run<T, R, W>(
    catalog: &SourceCatalog,
    transport: &T,
    prompter: &mut Prompter<R, W>,
    download_dir: &Path,
) -> Result<Option<Action>, NewsError>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    debug!(sources = ?catalog.list_sources(), "Showing source menu");
    catalog.display(prompter.output())?;
    let first = prompter.prompt(SOURCE_PROMPT)?;

    let articles = selector::index(select_and_fetch(catalog, transport, prompter, first).await?);
    if articles.is_empty() {
        writeln!(prompter.output(), "No articles found")?;
        return Ok(None);
    }

    selector::display(&articles, prompter.output())?;
    let article = choose_article(&articles, prompter)?;
    info!(title = %article.title, link = %article.link, "Article selected");

    let action = actions::act(transport, article, prompter, download_dir).await?;
    Ok(Some(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use crate::transport::fake::FakeTransport;
    use std::io::Cursor;

    const DEV_TO_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>DEV Community</title>
    <item>
      <title>Intro to Rust</title>
      <link>https://dev.to/alice/intro</link>
      <pubDate>Tue, 06 May 2025 14:30:00 +0000</pubDate>
    </item>
    <item>
      <title>Lifetimes Explained</title>
      <link>https://dev.to/bob/lifetimes</link>
    </item>
  </channel>
</rss>"#;

    const INTRO_PAGE: &str =
        "<html><body><h1>Intro</h1><p>Rust is fast.</p><p>Rust is safe.</p><p>Try it.</p></body></html>";

    fn transport() -> FakeTransport {
        FakeTransport::new()
            .with_page("https://dev.to/feed", DEV_TO_FEED)
            .with_page("https://dev.to/alice/intro", INTRO_PAGE)
    }

    fn prompter(input: &str) -> Prompter<Cursor<String>, Vec<u8>> {
        Prompter::new(Cursor::new(input.to_string()), Vec::new())
    }

    #[tokio::test]
    async fn test_download_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let mut p = prompter("1\n0\n2\n");

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();

        assert_eq!(action, Some(Action::Download));
        let saved = dir.path().join("Intro to Rust.html");
        assert_eq!(std::fs::read_to_string(&saved).unwrap(), INTRO_PAGE);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("(1) dev.to"));
        assert!(out.contains("(0) Intro to Rust\n(1) Lifetimes Explained\n"));
        assert_eq!(
            t.requests(),
            vec!["https://dev.to/feed", "https://dev.to/alice/intro"]
        );
    }

    #[tokio::test]
    async fn test_view_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let mut p = prompter("1\n0\n1\n");

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();

        assert_eq!(action, Some(Action::View));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.ends_with("Rust is fast.\nRust is safe.\nTry it.\n"));

        // header block, blank line, then exactly one line per paragraph
        let (header, body) = out.rsplit_once("\n\n").unwrap();
        assert!(header.ends_with("Intro to Rust\n2025-05-06 14:30 UTC\nhttps://dev.to/alice/intro"));
        assert_eq!(
            body.lines().collect::<Vec<_>>(),
            vec!["Rust is fast.", "Rust is safe.", "Try it."]
        );
    }

    #[tokio::test]
    async fn test_view_never_touches_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let unusable = dir.path().join("plain");
        std::fs::write(&unusable, "x").unwrap();
        let t = transport();
        let mut p = prompter("1\n0\n1\n");

        let action = run(&CATALOG, &t, &mut p, &unusable).await.unwrap();

        assert_eq!(action, Some(Action::View));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(std::fs::read_to_string(&unusable).unwrap(), "x");
    }

    #[tokio::test]
    async fn test_invalid_sources_reprompt() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let mut p = prompter("99\nabc\n0\n1\n1\n3\n");

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();

        assert_eq!(action, Some(Action::Nothing));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches(INVALID_SELECTION).count(), 3);
        assert_eq!(out.matches(SOURCE_PROMPT).count(), 4);
        assert_eq!(t.requests(), vec!["https://dev.to/feed"]);
    }

    #[tokio::test]
    async fn test_non_utf8_answers_reprompt() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let input = b"\xc3\x28\n1\n\xff\n0\n9\n".to_vec();
        let mut p = Prompter::new(Cursor::new(input), Vec::new());

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();

        assert_eq!(action, Some(Action::Nothing));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches(INVALID_SELECTION).count(), 2);
        assert_eq!(out.matches(SOURCE_PROMPT).count(), 2);
        assert_eq!(out.matches(ARTICLE_PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn test_many_invalid_sources_do_not_grow_the_stack() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let mut input = "0\n".repeat(50_000);
        input.push_str("1\n0\n9\n");
        let mut p = prompter(&input);

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();
        assert_eq!(action, Some(Action::Nothing));
    }

    #[tokio::test]
    async fn test_out_of_range_article_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let mut p = prompter("1\n7\n-1\nxyz\n1\n9\n");

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();

        assert_eq!(action, Some(Action::Nothing));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Invalid selection: article index 7 is out of range (0..2)"));
        assert!(out.contains("Invalid selection: article index -1 is out of range (0..2)"));
        assert_eq!(out.matches(ARTICLE_PROMPT).count(), 4);
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let dir = tempfile::tempdir().unwrap();
        let t = FakeTransport::new().with_page(
            "https://dev.to/feed",
            r#"<rss version="2.0"><channel><title>DEV</title></channel></rss>"#,
        );
        let mut p = prompter("1\n");

        let action = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap();

        assert_eq!(action, None);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.ends_with("No articles found\n"));
    }

    #[tokio::test]
    async fn test_feed_fetch_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let t = FakeTransport::new();
        let mut p = prompter("2\n0\n");

        let err = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(t.requests(), vec!["https://news.ycombinator.com/rss"]);
    }

    #[tokio::test]
    async fn test_closed_input_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let t = transport();
        let mut p = prompter("42\n");

        let err = run(&CATALOG, &t, &mut p, dir.path()).await.unwrap_err();
        assert!(matches!(err, NewsError::InputClosed));
    }
}
