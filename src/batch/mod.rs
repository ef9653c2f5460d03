// src/batch/mod.rs
// =============================================================================
// This module runs a whole list of domains through the sitemap pipeline.
//
// Submodules:
// - orchestrator: bounded worker pool, timeouts, progress callback
// - result: the records and report the caller gets back
// =============================================================================

mod orchestrator;
mod result;

pub use orchestrator::run_batch;
pub use result::{BatchReport, DomainResult, Summary};
