// src/test_support.rs
// =============================================================================
// Helpers shared by the test modules: sitemap XML builders and a reqwest
// client wired to a wiremock server.
//
// Domains in the tests look like "a.test:PORT". The client resolves both
// "a.test" and "www.a.test" to the mock server, so every candidate URL the
// resolver builds really reaches it, and a `host` header matcher tells the
// bare and www candidates apart.
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use wiremock::MockServer;

use crate::config::Settings;
use crate::domain::{normalize, Domain};
use crate::sitemap::client_builder;

// Builds a <urlset> with `count` page entries
pub fn leaf_xml(count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for i in 0..count {
        xml.push_str(&format!("<url><loc>https://example.com/page/{}</loc></url>", i));
    }
    xml.push_str("</urlset>");
    xml
}

// Builds a <sitemapindex> pointing at the given child URLs
pub fn index_xml(children: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#,
    );
    for child in children {
        xml.push_str(&format!(
            "<sitemap><loc>{}</loc><lastmod>2024-01-15</lastmod></sitemap>",
            child
        ));
    }
    xml.push_str("</sitemapindex>");
    xml
}

// Settings for talking plain HTTP to a local server, with short timeouts
pub fn test_settings() -> Settings {
    Settings {
        request_timeout: Duration::from_secs(5),
        task_timeout: Duration::from_secs(10),
        batch_timeout: Duration::from_secs(30),
        probe_timeout: Duration::from_secs(2),
        scheme: "http".to_string(),
        ..Settings::default()
    }
}

// A client whose DNS sends each host (and its www. twin) to the mock server
pub fn mock_client(server: &MockServer, hosts: &[&str]) -> (Client, Settings) {
    let settings = test_settings();
    let client = client_for(server, hosts, &settings);
    (client, settings)
}

pub fn client_for(server: &MockServer, hosts: &[&str], settings: &Settings) -> Client {
    let addr = *server.address();
    let mut builder = client_builder(settings);
    for host in hosts {
        builder = builder
            .resolve(host, addr)
            .resolve(&format!("www.{}", host), addr);
    }
    builder.build().unwrap()
}

// The domain a test host is reachable under ("a.test" -> "a.test:PORT")
pub fn mock_domain(server: &MockServer, host: &str) -> Domain {
    normalize(&format!("{}:{}", host, server.address().port())).unwrap()
}

// Value of the Host header a request to `host` carries
pub fn host_header(server: &MockServer, host: &str) -> String {
    format!("{}:{}", host, server.address().port())
}
