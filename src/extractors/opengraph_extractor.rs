//! OpenGraph meta tags extraction
//!
//! Collects declared `og*` properties from the document head.

use scraper::Selector;
use std::sync::LazyLock;

use crate::attributes::AttributeMap;
use crate::document::Document;

static PROPERTY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[property]").unwrap());

/// Copy every head element whose `property` starts with `og` and that has a
/// `content` attribute into `items`, keyed by the property minus its first
/// three characters.
///
/// The prefix check is deliberately loose: `ogtype` matches as well as
/// `og:type`. Later duplicates overwrite earlier values. Returns the number
/// of tags copied.
pub fn extract_opengraph(document: &Document, items: &mut AttributeMap) -> usize {
    let Some(head) = document.head() else {
        return 0;
    };

    let mut found = 0;
    for element in head.select(&PROPERTY_SEL) {
        let (Some(property), Some(content)) = (
            element.value().attr("property"),
            element.value().attr("content"),
        ) else {
            continue;
        };

        if !property.starts_with("og") {
            continue;
        }

        items.insert(strip_namespace(property), Some(content.to_string()));
        found += 1;
    }

    found
}

// "og:title" -> "title"
fn strip_namespace(property: &str) -> &str {
    property
        .char_indices()
        .nth(3)
        .map(|(idx, _)| &property[idx..])
        .unwrap_or("")
}
