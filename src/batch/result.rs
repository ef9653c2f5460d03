// src/batch/result.rs
// =============================================================================
// What a batch run hands back to the caller.
//
// - DomainResult: one record per domain, created once and never changed
// - BatchReport: all records plus start/end times
// - Summary: the totals shown under the results table
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::domain::Domain;
use crate::sitemap::{Method, PageEstimate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainResult {
    pub domain: Domain,
    pub pages: u64,
    pub method: Method,
}

impl DomainResult {
    pub fn new(domain: Domain, estimate: PageEstimate) -> Self {
        Self {
            domain,
            pages: estimate.pages,
            method: estimate.method,
        }
    }

    /// A scan counts as successful when it found at least one page.
    pub fn is_success(&self) -> bool {
        self.pages > 0
    }
}

// Output of one batch run
//
// `results` is in completion order. `timed_out` is set when the batch
// ceiling fired and unfinished domains were recorded as timeouts.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<DomainResult>,
    pub timed_out: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub processed: usize,
    pub successful: usize,
    pub total_pages: u64,
    /// Mean over successful scans only; None when nothing succeeded
    pub average_pages: Option<f64>,
}

impl BatchReport {
    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at).to_std().unwrap_or_default()
    }

    pub fn summary(&self) -> Summary {
        let successful: Vec<&DomainResult> = self.results.iter().filter(|r| r.is_success()).collect();
        let total_pages = self.results.iter().map(|r| r.pages).sum();
        let average_pages = if successful.is_empty() {
            None
        } else {
            let successful_pages: u64 = successful.iter().map(|r| r.pages).sum();
            Some(successful_pages as f64 / successful.len() as f64)
        };

        Summary {
            processed: self.results.len(),
            successful: successful.len(),
            total_pages,
            average_pages,
        }
    }

    // Results with the most pages first; ties keep completion order
    pub fn sorted_by_pages(&self) -> Vec<&DomainResult> {
        let mut sorted: Vec<&DomainResult> = self.results.iter().collect();
        sorted.sort_by(|a, b| b.pages.cmp(&a.pages));
        sorted
    }

    /// Domains that came back with no pages, and why.
    pub fn issues(&self) -> Vec<&DomainResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }
}
