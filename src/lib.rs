//! Open Graph metadata extraction for link previews
//!
//! Reads declared `og:*` meta tags from a page and, in scrape mode, fills
//! missing required attributes from the page itself:
//! - image: first `<img>` in the body
//! - title: the `<title>` element
//! - description: description meta, else first heading, else first paragraph
//! - type / url: `"other"` and the source URL
//!
//! ```no_run
//! use ogp::OpenGraph;
//!
//! let og = OpenGraph::fetch("https://www.rust-lang.org", true)?;
//! if og.is_valid() {
//!     println!("{}", og.to_html());
//! }
//! # Ok::<(), ogp::Error>(())
//! ```

pub mod attributes;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod open_graph;

pub use attributes::{AttributeMap, RequiredAttrs, DEFAULT_REQUIRED};
pub use document::Document;
pub use error::{Error, Result};
pub use extractors::Scraper;
pub use fetch::FetchOptions;
pub use open_graph::{OpenGraph, OpenGraphBuilder, DEFAULT_URL, INVALID_TAG};
