// src/domain/mod.rs
// =============================================================================
// This module turns whatever the user pasted into clean domain names.
//
// Submodules:
// - normalize: cleans one line and deduplicates a whole batch
//
// Everything downstream (sitemap lookup, reporting) works on `Domain` values,
// so it never has to worry about schemes, `www.` prefixes or trailing slashes.
// =============================================================================

mod normalize;

pub use normalize::{normalize, unique_domains, Domain};
