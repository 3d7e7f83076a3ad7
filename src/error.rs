//! Error types for Open Graph extraction

use thiserror::Error;

/// Errors surfaced while building an [`OpenGraph`](crate::OpenGraph)
#[derive(Debug, Error)]
pub enum Error {
    /// Network, HTTP status or body read failure while fetching the page
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    /// A required attribute has no scraper to fall back on
    #[error("no scraper registered for required attribute `{key}`")]
    MissingScraper { key: String },
    #[error("invalid fetch options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn fetch(url: &str, source: ureq::Error) -> Self {
        Error::Fetch {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    /// Returns true if this is a fetch error.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
