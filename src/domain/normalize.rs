// src/domain/normalize.rs
// =============================================================================
// Cleans raw user input into canonical domain names.
//
// Accepted shapes (all become "example.com"):
//   https://www.example.com/some/page
//   www.example.com
//   EXAMPLE.com/
//
// Rules, applied in order:
// 1. Trim surrounding whitespace
// 2. If the line starts with http:// or https://, keep only the URL's host
//    (and port, if one was given explicitly)
// 3. Lower-case
// 4. Drop a leading "www."
// 5. Drop trailing "/"
// Lines that end up empty are silently ignored.
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use url::Url;

// A canonical domain: lower-case, no scheme, no "www.", no trailing slash
//
// The only way to build one is through `normalize`, so holding a `Domain`
// means the cleaning rules have already been applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Cleans one line of input
//
// Returns None when nothing usable is left (blank line, URL without a host).
pub fn normalize(line: &str) -> Option<Domain> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let host = if has_http_scheme(trimmed) {
        host_of(trimmed)?
    } else {
        trimmed.to_string()
    };

    let lowered = host.to_lowercase();
    let without_www = lowered.strip_prefix("www.").unwrap_or(&lowered);
    let cleaned = without_www.trim_end_matches('/');

    if cleaned.is_empty() {
        None
    } else {
        Some(Domain(cleaned.to_string()))
    }
}

// Cleans every line and removes duplicates
//
// The first occurrence of a domain wins; later copies are dropped and the
// relative order of what remains is unchanged.
pub fn unique_domains<I, S>(lines: I) -> Vec<Domain>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter_map(|line| normalize(line.as_ref()))
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// Pulls "host" or "host:port" out of a full URL
fn host_of(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(input: &str) -> Option<String> {
        normalize(input).map(|d| d.as_str().to_string())
    }

    #[test]
    fn test_url_and_bare_forms_agree() {
        assert_eq!(normalized("https://WWW.Example.com/"), Some("example.com".to_string()));
        assert_eq!(normalized("example.com"), Some("example.com".to_string()));
        assert_eq!(normalized("www.example.com"), Some("example.com".to_string()));
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        assert_eq!(normalized(""), None);
        assert_eq!(normalized("   "), None);
        assert_eq!(normalized("\t\n"), None);
    }

    #[test]
    fn test_path_and_query_are_ignored_for_urls() {
        assert_eq!(
            normalized("http://blog.example.co.uk/posts/1?ref=x"),
            Some("blog.example.co.uk".to_string())
        );
    }

    #[test]
    fn test_explicit_port_is_kept() {
        assert_eq!(normalized("http://example.com:8080/"), Some("example.com:8080".to_string()));
    }

    #[test]
    fn test_trailing_slashes_stripped_from_bare_input() {
        assert_eq!(normalized("  Example.ORG// "), Some("example.org".to_string()));
    }

    #[test]
    fn test_only_leading_www_is_removed() {
        assert_eq!(normalized("mywww.example.com"), Some("mywww.example.com".to_string()));
        assert_eq!(normalized("www."), None);
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let domains = unique_domains(["a.com", "b.com", "a.com"]);
        let names: Vec<&str> = domains.iter().map(Domain::as_str).collect();
        assert_eq!(names, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_dedup_applies_after_normalizing() {
        let domains = unique_domains(vec![
            "https://a.com".to_string(),
            "".to_string(),
            "a.com".to_string(),
            "http://b.org".to_string(),
            "WWW.A.COM/".to_string(),
        ]);
        let names: Vec<&str> = domains.iter().map(Domain::as_str).collect();
        assert_eq!(names, vec!["a.com", "b.org"]);
    }
}
