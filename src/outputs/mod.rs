//! Files written by the reader.
//!
//! - [`download`]: saves the raw HTML of an article into the download directory
//!
//! # Output Structure
//!
//! ```text
//! download_dir/
//! ├── Breaking News.html
//! └── Report.html
//! ```

pub mod download;
