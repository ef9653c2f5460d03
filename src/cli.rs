// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - analyse: count pages for every domain (the real work)
// - domains: just show the cleaned, deduplicated domain list
//
// Both read domains the same way: positional arguments, a file (--file), or
// stdin when neither is given. One domain or URL per line.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    Settings, DEFAULT_BATCH_TIMEOUT, DEFAULT_MAX_CHILD_SITEMAPS, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_PROBE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TASK_TIMEOUT,
};

#[derive(Parser, Debug)]
#[command(
    name = "page-counter",
    version = "0.1.0",
    about = "Estimate how many pages a list of domains has, using their sitemaps",
    long_about = "page-counter looks for each domain's sitemap.xml (or sitemap_index.xml), counts the \
                  pages it lists, and falls back to checking the homepage when no sitemap is found."
)]
pub struct Cli {
    /// Print debug logs to stderr (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count pages for every domain
    ///
    /// Example: page-counter analyse example.com https://www.rust-lang.org
    Analyse {
        #[command(flatten)]
        input: InputArgs,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show the cleaned, deduplicated domain list without fetching anything
    ///
    /// Example: page-counter domains --file urls.txt
    Domains {
        #[command(flatten)]
        input: InputArgs,
    },
}

// Where the domains come from
#[derive(Args, Debug)]
pub struct InputArgs {
    /// URLs or domains to analyse (e.g., https://example.com or example.org)
    pub domains: Vec<String>,

    /// Read URLs or domains from a file, one per line
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

// Limits and timeouts; defaults come from config.rs
#[derive(Args, Debug)]
pub struct TuningArgs {
    /// How many domains to analyse at the same time
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, value_parser = parse_positive)]
    pub concurrency: usize,

    /// How many child sitemaps of a sitemap index to count
    #[arg(long, default_value_t = DEFAULT_MAX_CHILD_SITEMAPS, value_parser = parse_positive)]
    pub max_child_sitemaps: usize,

    /// Timeout for each sitemap request, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs(), value_parser = parse_seconds)]
    pub request_timeout: u64,

    /// Hard limit for one domain, in seconds
    #[arg(long, default_value_t = DEFAULT_TASK_TIMEOUT.as_secs(), value_parser = parse_seconds)]
    pub task_timeout: u64,

    /// Hard limit for the whole run, in seconds
    #[arg(long, default_value_t = DEFAULT_BATCH_TIMEOUT.as_secs(), value_parser = parse_seconds)]
    pub batch_timeout: u64,

    /// Timeout for the homepage check, in seconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT.as_secs(), value_parser = parse_seconds)]
    pub probe_timeout: u64,
}

impl TuningArgs {
    pub fn to_settings(&self) -> Settings {
        Settings {
            max_concurrency: self.concurrency,
            max_child_sitemaps: self.max_child_sitemaps,
            request_timeout: Duration::from_secs(self.request_timeout),
            task_timeout: Duration::from_secs(self.task_timeout),
            batch_timeout: Duration::from_secs(self.batch_timeout),
            probe_timeout: Duration::from_secs(self.probe_timeout),
            ..Settings::default()
        }
    }
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

// Timeouts must fit in a day; anything longer is almost certainly a typo
fn parse_seconds(value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(0) => Err("must be at least 1 second".to_string()),
        Ok(n) if n > 86_400 => Err("must be at most 86400 seconds".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
