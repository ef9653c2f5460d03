// src/sitemap/fetch.rs
// =============================================================================
// HTTP plumbing shared by the resolver, the index expander and the prober.
//
// Key functionality:
// - Builds the one reqwest Client a batch run uses (connection pooling)
// - Fetches a URL and parses the body as a sitemap
// - Turns every way that can go wrong into a `SkipReason` value
//
// Nothing here retries. A failed URL is reported once and the caller moves on.
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;

use super::document::SitemapDocument;
use crate::config::Settings;

// Why a candidate or child sitemap did not produce a document
//
// These are expected outcomes, not failures of the program: most domains
// simply don't have a sitemap at most of the guessed locations.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// Connection refused, DNS failure, reset, or the request timed out
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered, but not with 200 OK
    #[error("HTTP {0}")]
    Status(StatusCode),
    /// The body was not well-formed XML
    #[error("malformed XML: {0}")]
    Malformed(String),
}

// Client settings for a batch run, before `.build()`
//
// Split out from `build_client` so callers can add their own tweaks on top
// (the tests point host names at a local mock server this way).
pub fn client_builder(settings: &Settings) -> ClientBuilder {
    Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(settings.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
}

// Builds the HTTP client for one batch run
//
// The client is cheap to clone (it's an Arc inside), so every task gets a
// clone and all of them share one connection pool.
pub fn build_client(settings: &Settings) -> Result<Client> {
    client_builder(settings)
        .build()
        .context("failed to create HTTP client")
}

// GETs a URL and returns the body if the server answered 200 OK
pub async fn fetch_ok_body(client: &Client, url: &str, timeout: Duration) -> Result<Vec<u8>, SkipReason> {
    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(SkipReason::Status(status));
    }

    let body = response.bytes().await?;
    Ok(body.to_vec())
}

// GETs a URL and parses it as a sitemap
//
// Parsing a 50,000-entry sitemap takes real CPU time, so it runs on the
// blocking pool instead of stalling the other domains sharing this task.
pub async fn fetch_document(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<SitemapDocument, SkipReason> {
    let body = fetch_ok_body(client, url, timeout).await?;

    match tokio::task::spawn_blocking(move || SitemapDocument::parse(&body)).await {
        Ok(parsed) => parsed,
        // A panic in the parser is a bug, not a skip; let the task boundary see it
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(SkipReason::Malformed(e.to_string())),
    }
}
