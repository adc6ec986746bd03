//! Data models for news sources and feed articles.
//!
//! - [`Category`] and [`SourceEntry`]: rows of the static source catalog
//! - [`Article`]: one entry parsed out of an RSS or Atom feed

use chrono::{DateTime, Utc};
use std::fmt;

/// Grouping used when the source menu is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Tech,
    Politics,
    World,
    Military,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Tech => "Tech",
            Category::Politics => "Politics",
            Category::World => "World",
            Category::Military => "Military",
        };
        f.write_str(name)
    }
}

/// A selectable news source.
///
/// Entries are compiled into the binary and never change at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Number the user types to pick this source.
    pub id: i64,
    /// Feed URL (RSS 2.0 or Atom).
    pub url: &'static str,
    /// Human-readable name shown in the menu.
    pub label: &'static str,
    pub category: Category,
}

/// A single article as listed by a feed.
///
/// Created once by the feed parser and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// The headline.
    pub title: String,
    /// Absolute URL of the full article page.
    pub link: String,
    /// Feed-provided summary or description, possibly empty.
    pub summary: String,
    /// Publication time, when the feed carries one we can parse.
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Publication date formatted for display, e.g. `2025-05-06 14:30 UTC`.
    pub fn published_label(&self) -> Option<String> {
        self.published_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
    }
}
