//! The fixed table of news sources offered in the menu.
//!
//! | Id | Source | Category |
//! |----|--------|----------|
//! | 1-5 | dev.to, Hacker News, Ars Technica, The Verge, Wired | Tech |
//! | 6-8 | Politico, The Hill, NPR Politics | Politics |
//! | 9-11 | BBC World, Al Jazeera, The Guardian World | World |
//! | 12-14 | Defense News, Military Times, War on the Rocks | Military |

use crate::error::NewsError;
use crate::models::{Category, SourceEntry};
use once_cell::sync::Lazy;
use std::io::{self, Write};

/// The catalog, built on first use and shared for the life of the process.
pub static CATALOG: Lazy<SourceCatalog> = Lazy::new(SourceCatalog::builtin);

/// Immutable id → feed lookup.
#[derive(Debug)]
pub struct SourceCatalog {
    entries: Vec<SourceEntry>,
}

impl SourceCatalog {
    /// Build a catalog from arbitrary entries. Entries keep the given order.
    pub fn new(entries: Vec<SourceEntry>) -> Self {
        Self { entries }
    }

    fn builtin() -> Self {
        use Category::*;

        let rows: [(i64, &'static str, &'static str, Category); 14] = [
            (1, "https://dev.to/feed", "dev.to", Tech),
            (2, "https://news.ycombinator.com/rss", "Hacker News", Tech),
            (3, "https://feeds.arstechnica.com/arstechnica/index", "Ars Technica", Tech),
            (4, "https://www.theverge.com/rss/index.xml", "The Verge", Tech),
            (5, "https://www.wired.com/feed/rss", "Wired", Tech),
            (6, "https://www.politico.com/rss/politicopicks.xml", "Politico", Politics),
            (7, "https://thehill.com/feed/", "The Hill", Politics),
            (8, "https://feeds.npr.org/1014/rss.xml", "NPR Politics", Politics),
            (9, "https://feeds.bbci.co.uk/news/world/rss.xml", "BBC World", World),
            (10, "https://www.aljazeera.com/xml/rss/all.xml", "Al Jazeera", World),
            (11, "https://www.theguardian.com/world/rss", "The Guardian World", World),
            (
                12,
                "https://www.defensenews.com/arc/outboundfeeds/rss/?outputType=xml",
                "Defense News",
                Military,
            ),
            (
                13,
                "https://www.militarytimes.com/arc/outboundfeeds/rss/?outputType=xml",
                "Military Times",
                Military,
            ),
            (14, "https://warontherocks.com/feed/", "War on the Rocks", Military),
        ];

        Self::new(
            rows.into_iter()
                .map(|(id, url, label, category)| SourceEntry {
                    id,
                    url,
                    label,
                    category,
                })
                .collect(),
        )
    }

    /// `(id, label)` pairs in menu order.
    pub fn list_sources(&self) -> Vec<(i64, &'static str)> {
        self.entries.iter().map(|e| (e.id, e.label)).collect()
    }

    /// Look up a source by the number the user typed.
    pub fn resolve(&self, id: i64) -> Result<&SourceEntry, NewsError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(NewsError::UnknownSource(id))
    }

    /// Print the menu, one header per category followed by its sources.
    pub fn display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut current: Option<Category> = None;
        for entry in &self.entries {
            if current != Some(entry.category) {
                if current.is_some() {
                    writeln!(out)?;
                }
                writeln!(out, "--- {} ---", entry.category)?;
                current = Some(entry.category);
            }
            writeln!(out, "({}) {}", entry.id, entry.label)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
