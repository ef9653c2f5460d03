// src/batch/orchestrator.rs
// =============================================================================
// Runs the per-domain pipeline for a whole list of domains.
//
// How it works:
// - Each domain becomes one future: estimate_pages wrapped in the per-task
//   ceiling, with panics caught
// - buffer_unordered runs at most `max_concurrency` of them at once and
//   yields results as they complete (not in input order)
// - After every completion the caller's progress callback is invoked
// - The whole loop sits under the batch deadline. If it fires, the stream is
//   dropped, which cancels every in-flight request, and unfinished domains
//   are recorded as timeouts
//
// Two timeout layers: the per-task ceiling normally stops a slow domain;
// the batch deadline is only a backstop.
// =============================================================================

use chrono::Utc;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use reqwest::Client;
use std::any::Any;
use std::collections::HashSet;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use super::result::{BatchReport, DomainResult};
use crate::config::Settings;
use crate::domain::Domain;
use crate::sitemap::{estimate_pages, Method, PageEstimate};

// Resolves every domain and returns one result per domain
//
// Parameters:
//   client: shared HTTP client for this run (connection pool)
//   settings: pool size and timeouts
//   domains: unique domains to analyse
//   on_progress: called as (completed, total) after each domain settles;
//                it runs on the completion path, so keep it cheap
pub async fn run_batch<F>(
    client: &Client,
    settings: &Settings,
    domains: &[Domain],
    mut on_progress: F,
) -> BatchReport
where
    F: FnMut(usize, usize),
{
    let started_at = Utc::now();
    let total = domains.len();
    let deadline = Instant::now() + settings.batch_timeout;

    info!(total, concurrency = settings.max_concurrency, "starting batch");

    let tasks = domains.iter().cloned().map(|domain| {
        let client = client.clone();
        let settings = settings.clone();
        async move {
            let work = estimate_pages(&client, &settings, &domain);
            settle(&domain, settings.task_timeout, work).await
        }
    });

    let mut completions = stream::iter(tasks).buffer_unordered(settings.max_concurrency.max(1));

    let mut results = Vec::with_capacity(total);
    let mut timed_out = false;
    loop {
        match tokio::time::timeout_at(deadline, completions.next()).await {
            Ok(Some(result)) => {
                results.push(result);
                on_progress(results.len(), total);
            }
            Ok(None) => break,
            Err(_) => {
                timed_out = true;
                break;
            }
        }
    }
    // Dropping the stream drops the futures still in flight, and with them
    // their HTTP requests.
    drop(completions);

    if timed_out {
        let settled: HashSet<&Domain> = results.iter().map(|r| &r.domain).collect();
        let abandoned: Vec<Domain> = domains
            .iter()
            .filter(|domain| !settled.contains(domain))
            .cloned()
            .collect();
        warn!(
            abandoned = abandoned.len(),
            completed = results.len(),
            "batch deadline reached, abandoning unfinished domains"
        );
        results.extend(
            abandoned
                .into_iter()
                .map(|domain| DomainResult::new(domain, PageEstimate::new(0, Method::Timeout))),
        );
    }

    let report = BatchReport {
        started_at,
        finished_at: Utc::now(),
        results,
        timed_out,
    };
    info!(
        results = report.results.len(),
        elapsed_ms = report.elapsed().as_millis() as u64,
        "batch finished"
    );
    report
}

// Turns one domain's work into a DomainResult, whatever happens to it
//
// - finished in time          -> its estimate
// - returned an error         -> "Error: <message>"
// - panicked                  -> "Error: <panic message>"
// - ran past `ceiling`        -> "Timeout" (the work future is dropped)
async fn settle<W>(domain: &Domain, ceiling: Duration, work: W) -> DomainResult
where
    W: Future<Output = anyhow::Result<PageEstimate>>,
{
    let guarded = AssertUnwindSafe(work).catch_unwind();

    let estimate = match tokio::time::timeout(ceiling, guarded).await {
        Ok(Ok(Ok(estimate))) => estimate,
        Ok(Ok(Err(e))) => {
            warn!(%domain, error = %e, "domain failed");
            PageEstimate::new(0, Method::error(e))
        }
        Ok(Err(panic)) => {
            let message = panic_message(&*panic);
            warn!(%domain, error = %message, "domain task panicked");
            PageEstimate::new(0, Method::error(message))
        }
        Err(_) => {
            warn!(%domain, ceiling_ms = ceiling.as_millis() as u64, "domain timed out");
            PageEstimate::new(0, Method::Timeout)
        }
    };

    DomainResult::new(domain.clone(), estimate)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
