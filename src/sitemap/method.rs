// src/sitemap/method.rs
// =============================================================================
// The label that explains how a domain's page count was obtained.
//
// This is a closed set. The text form of each variant is what users see in
// the table and in the JSON output, e.g. "Sitemap index (3 sitemaps)".
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;

/// Longest error message kept in an `Error: ...` label.
pub const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// Counted `<url>` entries in one sitemap
    SingleSitemap,
    /// Summed child sitemaps of an index; `sitemaps` is how many the index listed
    SitemapIndex { sitemaps: usize },
    /// No sitemap, but the homepage answered
    HomepageOnly,
    /// No sitemap and no homepage
    DomainInaccessible,
    /// The domain's task ran past its ceiling (or the batch's)
    Timeout,
    /// Something unexpected went wrong; holds a shortened message
    Error(String),
}

impl Method {
    // Builds an Error label, keeping at most MAX_ERROR_CHARS characters
    pub fn error(message: impl fmt::Display) -> Self {
        let message: String = message.to_string().chars().take(MAX_ERROR_CHARS).collect();
        Method::Error(message)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::SingleSitemap => f.write_str("Single sitemap"),
            Method::SitemapIndex { sitemaps } => write!(f, "Sitemap index ({} sitemaps)", sitemaps),
            Method::HomepageOnly => f.write_str("Homepage only (estimate)"),
            Method::DomainInaccessible => f.write_str("Domain inaccessible"),
            Method::Timeout => f.write_str("Timeout"),
            Method::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

// Serialized as its display label, same as the table shows it
impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// A page count together with the method that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEstimate {
    pub pages: u64,
    pub method: Method,
}

impl PageEstimate {
    pub fn new(pages: u64, method: Method) -> Self {
        Self { pages, method }
    }
}
