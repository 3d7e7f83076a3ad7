//! Parsed HTML document with section queries
//!
//! The html5ever tree builder behind `scraper` always synthesizes `<html>`,
//! `<head>` and `<body>`. Extraction needs to tell a page that declares
//! those sections apart from a fragment that doesn't, so `Document` records
//! which start tags were actually written in the markup and reports implied
//! sections as missing.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// Comments and raw-text element bodies, whichever opens first. An unclosed
// one runs to the end of the input.
static OPAQUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?(?:-->|\z)|<(?:script|style|textarea|title)\b[^>]*>.*?(?:</(?:script|style|textarea|title)\s*>|\z)",
    )
    .unwrap()
});
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<html[\s/>]").unwrap());
static HEAD_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<head[\s/>]").unwrap());
static BODY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body[\s/>]").unwrap());

static HEAD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("head").unwrap());
static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// An HTML document plus the sections its markup declared
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    has_root: bool,
    has_head: bool,
    has_body: bool,
}

impl Document {
    /// Parse raw markup. Never fails; broken markup just yields fewer sections.
    pub fn parse(markup: &str) -> Self {
        let source = OPAQUE_RE.replace_all(markup, "");

        Self {
            html: Html::parse_document(markup),
            has_root: HTML_TAG_RE.is_match(&source),
            has_head: HEAD_TAG_RE.is_match(&source),
            has_body: BODY_TAG_RE.is_match(&source),
        }
    }

    /// Wrap a tree parsed elsewhere. Without the source markup there is no
    /// way to tell implied sections apart, so every section counts as present.
    pub fn from_parsed(html: Html) -> Self {
        Self {
            html,
            has_root: true,
            has_head: true,
            has_body: true,
        }
    }

    pub fn has_root(&self) -> bool {
        self.has_root
    }

    pub fn has_head(&self) -> bool {
        self.has_head
    }

    pub fn has_body(&self) -> bool {
        self.has_body
    }

    /// The `<html>` element, if declared
    pub fn root(&self) -> Option<ElementRef<'_>> {
        self.has_root.then(|| self.html.root_element())
    }

    /// The `<head>` element, if the document has a root and declared a head
    pub fn head(&self) -> Option<ElementRef<'_>> {
        if !self.has_root || !self.has_head {
            return None;
        }
        self.html.select(&HEAD_SEL).next()
    }

    /// The `<body>` element, if the document has a root and declared a body
    pub fn body(&self) -> Option<ElementRef<'_>> {
        if !self.has_root || !self.has_body {
            return None;
        }
        self.html.select(&BODY_SEL).next()
    }

    /// First element under the root matching `selector`, in document order
    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.root()?.select(selector).next()
    }

    /// The underlying `scraper` tree
    pub fn html(&self) -> &Html {
        &self.html
    }
}

impl From<Html> for Document {
    fn from(html: Html) -> Self {
        Self::from_parsed(html)
    }
}

/// Concatenated text of an element and its descendants, untrimmed
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_sections() {
        let doc = Document::parse("<html><head><title>T</title></head><body><p>x</p></body></html>");
        assert!(doc.has_root());
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_implied_sections_are_missing() {
        let doc = Document::parse("<p>just a paragraph</p>");
        assert!(!doc.has_root());
        assert!(doc.root().is_none());
        assert!(doc.head().is_none());
        assert!(doc.body().is_none());

        let doc = Document::parse("<html><p>no head</p></html>");
        assert!(doc.has_root());
        assert!(doc.head().is_none());
        assert!(doc.body().is_none());
    }

    #[test]
    fn test_header_is_not_head() {
        let doc = Document::parse("<HTML><header>nav</header><BODY class=\"x\"></BODY></HTML>");
        assert!(doc.has_root());
        assert!(!doc.has_head());
        assert!(doc.has_body());
    }

    #[test]
    fn test_commented_out_sections_ignored() {
        let doc = Document::parse("<!-- <html><head></head> --><p>hi</p>");
        assert!(!doc.has_root());
        assert!(!doc.has_head());
    }

    #[test]
    fn test_raw_text_sections_ignored() {
        let doc = Document::parse(r#"<p>frag</p><script>var s = "<html><head>";</script>"#);
        assert!(!doc.has_root());
        assert!(!doc.has_head());

        let doc = Document::parse("<style>/* <body> */</style><textarea><html></textarea>");
        assert!(!doc.has_root());
        assert!(!doc.has_body());

        let doc = Document::parse("<script type=\"text/template\"><html><body>");
        assert!(!doc.has_root());
        assert!(!doc.has_body());
    }

    #[test]
    fn test_sections_after_raw_text_still_found() {
        let doc = Document::parse(
            "<html><head><title>a <body> tag</title><script>1 < 2</script></head><body></body></html>",
        );
        assert!(doc.has_root());
        assert!(doc.has_head());
        assert!(doc.has_body());
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_empty_markup() {
        let doc = Document::parse("");
        assert!(!doc.has_root());
        assert!(doc.first(&Selector::parse("p").unwrap()).is_none());
    }

    #[test]
    fn test_from_parsed_assumes_sections() {
        let doc = Document::from(Html::parse_document("<p>x</p>"));
        assert!(doc.has_root());
        assert!(doc.head().is_some());
        let p = doc.first(&Selector::parse("p").unwrap()).unwrap();
        assert_eq!(element_text(&p), "x");
    }
}
