//! What to do with the chosen article: read it here or save it locally.

use crate::error::NewsError;
use crate::models::Article;
use crate::outputs::download::download;
use crate::prompt::{Choice, Prompter};
use crate::scrapers::article::{plain_text, view};
use crate::transport::Transport;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

pub const ACTION_PROMPT: &str = "view (1) or download (2) : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Download,
    /// Any other answer; nothing happens.
    Nothing,
}

impl From<Choice> for Action {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Number(1) => Action::View,
            Choice::Number(2) => Action::Download,
            _ => Action::Nothing,
        }
    }
}

/// Title, date, link and feed summary, followed by a blank line.
///
/// Printed by the view action ahead of the scraped paragraphs. Paragraph
/// lines are never blank, so everything after the last blank line is
/// article text.
pub fn print_header<W: Write>(article: &Article, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", article.title)?;
    if let Some(date) = article.published_label() {
        writeln!(out, "{date}")?;
    }
    writeln!(out, "{}", article.link)?;
    let summary = plain_text(&article.summary);
    if !summary.is_empty() {
        writeln!(out)?;
        writeln!(out, "{summary}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Ask once and carry out the answer.
///
/// View prints [`print_header`] and then one line per paragraph.
///
/// Viewing never fails on network errors. Download errors are returned to
/// the caller.
pub async fn act<T, R, W>(
    transport: &T,
    article: &Article,
    prompter: &mut Prompter<R, W>,
    download_dir: &Path,
) -> Result<Action, NewsError>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let action = Action::from(prompter.prompt(ACTION_PROMPT)?);
    match action {
        Action::View => {
            print_header(article, prompter.output())?;
            view(transport, article, prompter.output()).await?;
        }
        Action::Download => {
            let path = download(transport, article, download_dir).await?;
            writeln!(prompter.output(), "Saved {}", path.display())?;
        }
        Action::Nothing => debug!("No action chosen"),
    }
    Ok(action)
}
