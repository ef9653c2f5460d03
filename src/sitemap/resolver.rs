// src/sitemap/resolver.rs
// =============================================================================
// Finds a domain's sitemap and turns it into a page count.
//
// How it works:
// 1. Build the four candidate URLs, in priority order:
//      {scheme}://{domain}/sitemap.xml
//      {scheme}://www.{domain}/sitemap.xml
//      {scheme}://{domain}/sitemap_index.xml
//      {scheme}://www.{domain}/sitemap_index.xml
// 2. Try them one by one. The first that returns well-formed XML wins and
//    the rest are never requested.
// 3. A leaf sitemap is counted directly; an index is handed to the expander.
// 4. If that leaves us with 0 pages, fall back to the homepage probe.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::document::SitemapDocument;
use super::expand::expand_index;
use super::fetch::fetch_document;
use super::method::{Method, PageEstimate};
use super::probe::probe_homepage;
use crate::config::Settings;
use crate::domain::Domain;

const SITEMAP_PATHS: [&str; 2] = ["sitemap.xml", "sitemap_index.xml"];

// The four guessed sitemap locations for a domain
//
// Errors if the domain can't form a valid URL (e.g. it contains spaces).
pub fn candidate_urls(domain: &Domain, scheme: &str) -> Result<Vec<Url>> {
    let mut urls = Vec::with_capacity(4);
    for sitemap_path in SITEMAP_PATHS {
        for prefix in ["", "www."] {
            let raw = format!("{}://{}{}/{}", scheme, prefix, domain, sitemap_path);
            let url = Url::parse(&raw).map_err(|e| anyhow!("invalid domain '{}': {}", domain, e))?;
            urls.push(url);
        }
    }
    Ok(urls)
}

// Walks the candidates and counts the first sitemap that parses
//
// Returns None when no candidate produced a document at all.
pub async fn resolve_sitemap(
    client: &Client,
    settings: &Settings,
    domain: &Domain,
) -> Result<Option<PageEstimate>> {
    for candidate in candidate_urls(domain, &settings.scheme)? {
        let document = match fetch_document(client, candidate.as_str(), settings.request_timeout).await {
            Ok(document) => document,
            Err(reason) => {
                debug!(url = %candidate, %reason, "sitemap candidate skipped");
                continue;
            }
        };

        let estimate = match document {
            SitemapDocument::Index { children } => {
                debug!(url = %candidate, children = children.len(), "found sitemap index");
                let pages = expand_index(client, settings, &children).await;
                PageEstimate::new(pages, Method::SitemapIndex { sitemaps: children.len() })
            }
            SitemapDocument::Leaf { urls } => {
                debug!(url = %candidate, urls, "found sitemap");
                PageEstimate::new(urls as u64, Method::SingleSitemap)
            }
        };
        return Ok(Some(estimate));
    }

    Ok(None)
}

// Full per-domain pipeline: sitemap first, homepage probe if that gave 0 pages
#[instrument(skip_all, fields(domain = %domain))]
pub async fn estimate_pages(client: &Client, settings: &Settings, domain: &Domain) -> Result<PageEstimate> {
    match resolve_sitemap(client, settings, domain).await? {
        Some(estimate) if estimate.pages > 0 => Ok(estimate),
        _ => Ok(probe_homepage(client, settings, domain).await),
    }
}
