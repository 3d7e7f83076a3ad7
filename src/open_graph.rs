//! Open Graph extraction with optional body-scraping fallbacks
//!
//! An [`OpenGraph`] is built in one pass: declared `og*` tags are read from
//! the head, missing required attributes are scraped from the page when
//! scrape mode is on, and the image is resolved against the source URL.
//! After construction it is read-only.

use std::borrow::Cow;
use std::fmt;
use tracing::{debug, trace};
use url::Url;

use crate::attributes::{AttributeMap, RequiredAttrs};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::extractors::{extract_opengraph, Scraper};
use crate::fetch::{fetch_html, FetchOptions};

/// Source URL used when none is given
pub const DEFAULT_URL: &str = "http://example.com";

/// Markup returned by [`OpenGraph::to_html`] when required attributes are missing
pub const INVALID_TAG: &str = r#"<meta property="og:error" content="og metadata is not valid" />"#;

/// Open Graph metadata extracted from one page
#[derive(Debug, Clone)]
pub struct OpenGraph {
    url: String,
    items: AttributeMap,
    required: RequiredAttrs,
    scrape: bool,
}

#[derive(Debug, Clone)]
enum Source {
    Fetch,
    Html(String),
    Document(Document),
}

/// Construction options for [`OpenGraph`]
#[derive(Debug, Clone)]
pub struct OpenGraphBuilder {
    url: String,
    source: Source,
    scrape: bool,
    required: RequiredAttrs,
    fetch_options: FetchOptions,
}

impl Default for OpenGraphBuilder {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            source: Source::Fetch,
            scrape: false,
            required: RequiredAttrs::default(),
            fetch_options: FetchOptions::default(),
        }
    }
}

impl OpenGraphBuilder {
    /// Page URL: fetched when no HTML is given, and always the base for
    /// relative links and the scraped `url` value
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Use this markup instead of fetching. An empty string still counts.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.source = Source::Html(html.into());
        self
    }

    /// Use an already parsed document instead of fetching
    pub fn document(mut self, document: Document) -> Self {
        self.source = Source::Document(document);
        self
    }

    /// Scrape missing required attributes from the page body
    pub fn scrape(mut self, scrape: bool) -> Self {
        self.scrape = scrape;
        self
    }

    pub fn required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = RequiredAttrs::new(keys);
        self
    }

    /// Options passed to the HTTP client; unused when HTML or a document is given
    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Obtain the document and run extraction.
    ///
    /// Fails on fetch errors, or in scrape mode when a missing required
    /// attribute has no scraper.
    pub fn build(self) -> Result<OpenGraph> {
        let document = match self.source {
            Source::Document(document) => document,
            Source::Html(html) => Document::parse(&html),
            Source::Fetch => Document::parse(&fetch_html(&self.url, &self.fetch_options)?),
        };

        let mut og = OpenGraph {
            url: self.url,
            items: AttributeMap::new(),
            required: self.required,
            scrape: self.scrape,
        };
        og.parse(&document)?;
        Ok(og)
    }
}

impl OpenGraph {
    pub fn builder() -> OpenGraphBuilder {
        OpenGraphBuilder::default()
    }

    /// Extract from markup with the default required attributes
    pub fn from_html(url: impl Into<String>, html: impl Into<String>, scrape: bool) -> Result<Self> {
        Self::builder().url(url).html(html).scrape(scrape).build()
    }

    /// Extract from a parsed document with the default required attributes
    pub fn from_document(url: impl Into<String>, document: Document, scrape: bool) -> Result<Self> {
        Self::builder().url(url).document(document).scrape(scrape).build()
    }

    /// Fetch `url` with default options and extract from it
    pub fn fetch(url: impl Into<String>, scrape: bool) -> Result<Self> {
        Self::builder().url(url).scrape(scrape).build()
    }

    fn parse(&mut self, document: &Document) -> Result<()> {
        if !document.has_root() {
            debug!(url = %self.url, "document has no root element");
            return Ok(());
        }

        let declared = extract_opengraph(document, &mut self.items);
        debug!(url = %self.url, declared, "read declared og tags");

        if self.scrape {
            let scrapers = self
                .required
                .missing_from(&self.items)
                .into_iter()
                .map(|key| {
                    Scraper::from_key(key).ok_or_else(|| Error::MissingScraper {
                        key: key.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            for scraper in scrapers {
                let value = scraper.scrape(document, &self.url);
                trace!(key = scraper.key(), found = value.is_some(), "scraped attribute");
                self.items.insert(scraper.key(), value);
            }
        }

        self.resolve_image();
        Ok(())
    }

    fn resolve_image(&mut self) {
        let Some(image) = self.items.get("image").filter(|v| !v.is_empty()) else {
            return;
        };

        let absolute = self.absolute(image);
        self.items.insert("image", Some(absolute));
    }

    /// Resolve `link` against the source URL.
    ///
    /// Links that already parse as absolute URLs are returned exactly as
    /// written. A relative link that can't be joined is returned unchanged.
    pub fn absolute(&self, link: &str) -> String {
        if Url::parse(link).is_ok() {
            return link.to_string();
        }

        match Url::parse(&self.url).and_then(|base| base.join(link)) {
            Ok(absolute) => absolute.into(),
            Err(e) => {
                debug!(url = %self.url, link, error = %e, "could not resolve link");
                link.to_string()
            }
        }
    }

    /// Source URL
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn items(&self) -> &AttributeMap {
        &self.items
    }

    pub fn required(&self) -> &RequiredAttrs {
        &self.required
    }

    pub fn scrape(&self) -> bool {
        self.scrape
    }

    /// Extracted value for `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key)
    }

    /// Whether `key` was extracted, even if scraping found nothing for it
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// True when every required key is present. Values are not inspected.
    pub fn is_valid(&self) -> bool {
        self.required.is_satisfied_by(&self.items)
    }

    /// Render the attributes as `<meta property="og:…">` tags, one per line
    /// in extraction order, or [`INVALID_TAG`] when not valid.
    ///
    /// A key whose scraper found nothing renders with the content `None`.
    pub fn to_html(&self) -> String {
        if !self.is_valid() {
            return INVALID_TAG.to_string();
        }

        let mut meta = String::new();
        for (key, value) in self.items.iter() {
            meta.push_str(&format!(
                "\n<meta property=\"og:{}\" content=\"{}\" />",
                escape_attr(key),
                escape_attr(value.unwrap_or("None")),
            ));
        }
        meta.push('\n');

        meta
    }
}

impl fmt::Display for OpenGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(&['&', '"', '<', '>'][..]) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
