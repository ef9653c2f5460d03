// src/sitemap/expand.rs
// =============================================================================
// Follows the children of a sitemap index and adds up their page counts.
//
// Only the first `max_child_sitemaps` children are fetched; big sites list
// hundreds and we just want an estimate in bounded time.
//
// A child that fails (network error, timeout, bad XML) is skipped. One broken
// child sitemap must not throw away the count from the others.
// =============================================================================

use reqwest::Client;
use tracing::debug;

use super::fetch::fetch_document;
use crate::config::Settings;

// Sums the `<url>` entries across the first few child sitemaps
//
// Children are fetched one after another, so a domain holds at most one
// open request at a time.
pub async fn expand_index(client: &Client, settings: &Settings, children: &[String]) -> u64 {
    let mut total: u64 = 0;

    for child in children.iter().take(settings.max_child_sitemaps) {
        match fetch_document(client, child, settings.request_timeout).await {
            Ok(document) => {
                let urls = document.url_count() as u64;
                debug!(child = %child, urls, "counted child sitemap");
                total += urls;
            }
            Err(reason) => {
                debug!(child = %child, %reason, "skipping child sitemap");
            }
        }
    }

    total
}
