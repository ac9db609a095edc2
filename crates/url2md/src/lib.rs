// ABOUTME: Main library entry point for url2md, a single-article web page to Markdown converter.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Article, ParseError, ErrorCode, Options.

//! url2md - fetch one article page and convert it to GFM Markdown.
//!
//! Pages from known Chinese publishing platforms are extracted with
//! per-platform selectors; everything else falls back to generic ones. When
//! the direct fetch is rejected, a web-archive snapshot is tried once.
//!
//! # Example
//!
//! ```no_run
//! use url2md::{Client, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let client = Client::builder().build()?;
//!     let article = client.parse("https://juejin.cn/post/123")?;
//!     println!("{}", article.to_json(true)?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod formats;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::client::{extract_article, normalize_url, Client};
pub use crate::error::{ErrorCode, ParseError};
pub use crate::extractors::platforms::{resolve, SiteProfile, GENERIC, PLATFORMS};
pub use crate::formats::html_to_markdown;
pub use crate::options::{ClientBuilder, Options};
pub use crate::result::Article;
