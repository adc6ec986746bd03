//! Article page scraping.
//!
//! Only one page is ever fetched per view: the article's own link. Links
//! found in the page are never followed.
//!
//! - [`article`]: paragraph extraction and the `view` action

pub mod article;
