// src/config.rs
// =============================================================================
// Tunable knobs for a batch run, collected in one `Settings` struct.
//
// Every limit the pipeline enforces (worker pool size, how many child
// sitemaps we follow, the timeout layers) lives here as a named constant with
// its default value. The CLI overrides them with flags; tests shrink the
// timeouts so they finish in milliseconds.
// =============================================================================

use std::time::Duration;

/// How many domains are resolved at the same time.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// How many child sitemaps of an index are fetched and counted.
pub const DEFAULT_MAX_CHILD_SITEMAPS: usize = 10;

/// Timeout for every single sitemap request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Hard ceiling for resolving one domain, all requests included.
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(25);

/// Ceiling for the whole batch. Anything still running is abandoned.
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for the homepage liveness check.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Redirect hops we follow before giving up on a request.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Sent with every request so site owners can tell who is asking.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; PageCounter/1.0)";

// All settings for one batch run
//
// Clone is cheap enough (a few numbers and two short strings) that every
// per-domain task gets its own copy instead of sharing a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub max_concurrency: usize,
    pub max_child_sitemaps: usize,
    pub request_timeout: Duration,
    pub task_timeout: Duration,
    pub batch_timeout: Duration,
    pub probe_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    /// "https" in production. Tests talk plain "http" to a local mock server.
    pub scheme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_child_sitemaps: DEFAULT_MAX_CHILD_SITEMAPS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            task_timeout: DEFAULT_TASK_TIMEOUT,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: USER_AGENT.to_string(),
            scheme: "https".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_limits() {
        let settings = Settings::default();
        assert_eq!(settings.max_concurrency, 10);
        assert_eq!(settings.max_child_sitemaps, 10);
        assert_eq!(settings.request_timeout, Duration::from_secs(20));
        assert_eq!(settings.task_timeout, Duration::from_secs(25));
        assert_eq!(settings.batch_timeout, Duration::from_secs(300));
        assert_eq!(settings.probe_timeout, Duration::from_secs(5));
        assert_eq!(settings.scheme, "https");
    }

    #[test]
    fn test_homepage_timeout_is_shorter_than_sitemap_requests() {
        let settings = Settings::default();
        assert!(settings.probe_timeout < settings.request_timeout);
        assert!(settings.request_timeout < settings.task_timeout);
        assert!(settings.task_timeout < settings.batch_timeout);
    }
}
