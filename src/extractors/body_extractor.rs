//! Fallback scrapers for attributes the page didn't declare
//!
//! Each scraper is a pure function of the document. [`Scraper`] is the
//! registry mapping attribute keys to them.

use scraper::Selector;
use std::sync::LazyLock;

use crate::document::{element_text, Document};

static IMG_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static META_NAME_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[name]").unwrap());
static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static PARAGRAPH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Meta names that carry a page description
const DESCRIPTION_NAMES: [&str; 3] = ["description", "DC.description", "eprints.abstract"];

/// Value the `type` scraper always reports
pub const DEFAULT_TYPE: &str = "other";

/// Attributes that can be scraped from the page body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scraper {
    Image,
    Title,
    Type,
    Url,
    Description,
}

impl Scraper {
    pub const ALL: [Scraper; 5] = [
        Scraper::Image,
        Scraper::Title,
        Scraper::Type,
        Scraper::Url,
        Scraper::Description,
    ];

    /// Look up the scraper for an attribute key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Scraper::Image => "image",
            Scraper::Title => "title",
            Scraper::Type => "type",
            Scraper::Url => "url",
            Scraper::Description => "description",
        }
    }

    /// Run the scraper. `source_url` is what the `url` scraper reports.
    pub fn scrape(self, document: &Document, source_url: &str) -> Option<String> {
        match self {
            Scraper::Image => scrape_image(document),
            Scraper::Title => scrape_title(document),
            Scraper::Type => Some(DEFAULT_TYPE.to_string()),
            Scraper::Url => Some(source_url.to_string()),
            Scraper::Description => scrape_description(document),
        }
    }
}

/// `src` of the first `<img>` in the body. Images without a `src` are skipped.
pub fn scrape_image(document: &Document) -> Option<String> {
    document
        .body()?
        .select(&IMG_SEL)
        .find_map(|img| img.value().attr("src"))
        .map(String::from)
}

/// Text of the `<title>` in the head
pub fn scrape_title(document: &Document) -> Option<String> {
    document
        .head()?
        .select(&TITLE_SEL)
        .next()
        .map(|title| element_text(&title))
}

/// First non-empty description meta in the head, else the first heading,
/// else the first paragraph.
pub fn scrape_description(document: &Document) -> Option<String> {
    let head = document.head()?;

    let from_meta = head
        .select(&META_NAME_SEL)
        .filter(|meta| {
            meta.value()
                .attr("name")
                .is_some_and(|name| DESCRIPTION_NAMES.contains(&name))
        })
        .find_map(|meta| meta.value().attr("content").filter(|c| !c.is_empty()));
    if let Some(content) = from_meta {
        return Some(content.to_string());
    }

    document
        .first(&HEADING_SEL)
        .or_else(|| document.first(&PARAGRAPH_SEL))
        .map(|element| element_text(&element))
}
