// src/sitemap/mod.rs
// =============================================================================
// This module works out how many pages one domain has.
//
// Submodules:
// - fetch: the shared HTTP client and "GET + parse" helper
// - document: classifies a sitemap body as an index or a leaf
// - resolver: tries the candidate sitemap URLs in order
// - expand: sums the child sitemaps of an index
// - probe: homepage liveness check when no sitemap helped
// - method: the label describing how a count was obtained
//
// The batch module only needs `estimate_pages`, the client builders and the
// result types; everything else stays internal.
// =============================================================================

mod document;
mod expand;
mod fetch;
mod method;
mod probe;
mod resolver;

pub use fetch::{build_client, client_builder};
pub use method::{Method, PageEstimate};
pub use resolver::estimate_pages;
