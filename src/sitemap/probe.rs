// src/sitemap/probe.rs
// =============================================================================
// Last resort when no sitemap produced a count: is the domain even alive?
//
// One GET to the homepage with a short timeout. This is a liveness check, not
// content enumeration, so we don't wait as long as for a sitemap.
// =============================================================================

use reqwest::{Client, StatusCode};
use tracing::debug;

use super::method::{Method, PageEstimate};
use crate::config::Settings;
use crate::domain::Domain;

// 200 OK from the homepage => 1 page; anything else => inaccessible
//
// Only the status line and headers are awaited. The body is never read, so
// a homepage that answers quickly but streams slowly still counts as live.
pub async fn probe_homepage(client: &Client, settings: &Settings, domain: &Domain) -> PageEstimate {
    let url = format!("{}://{}", settings.scheme, domain);

    match client.get(&url).timeout(settings.probe_timeout).send().await {
        Ok(response) if response.status() == StatusCode::OK => PageEstimate::new(1, Method::HomepageOnly),
        Ok(response) => {
            debug!(%domain, status = %response.status(), "homepage check failed");
            PageEstimate::new(0, Method::DomainInaccessible)
        }
        Err(e) => {
            debug!(%domain, error = %e, "homepage check failed");
            PageEstimate::new(0, Method::DomainInaccessible)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize;
    use crate::test_support::{host_header, mock_client, mock_domain, test_settings};
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_live_homepage_counts_as_one_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("host", host_header(&server, "live.test").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let (client, settings) = mock_client(&server, &["live.test"]);
        let domain = mock_domain(&server, "live.test");

        let estimate = probe_homepage(&client, &settings, &domain).await;
        assert_eq!(estimate, PageEstimate::new(1, Method::HomepageOnly));
    }

    #[tokio::test]
    async fn test_error_status_is_inaccessible() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (client, settings) = mock_client(&server, &["down.test"]);
        let domain = mock_domain(&server, "down.test");

        let estimate = probe_homepage(&client, &settings, &domain).await;
        assert_eq!(estimate, PageEstimate::new(0, Method::DomainInaccessible));
    }

    #[tokio::test]
    async fn test_homepage_check_uses_its_own_short_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let (client, mut settings) = mock_client(&server, &["slow.test"]);
        settings.probe_timeout = Duration::from_millis(200);
        let domain = mock_domain(&server, "slow.test");

        let started = std::time::Instant::now();
        let estimate = probe_homepage(&client, &settings, &domain).await;
        assert_eq!(estimate.method, Method::DomainInaccessible);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_headers_are_enough_even_if_body_stalls() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Sends the status line and half of the body, then goes quiet
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nhello")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(3)).await;
            let _ = socket.write_all(b"world").await;
        });

        let mut settings = test_settings();
        settings.probe_timeout = Duration::from_millis(300);
        let client = crate::sitemap::build_client(&settings).unwrap();
        let domain = normalize(&format!("127.0.0.1:{}", port)).unwrap();

        let started = std::time::Instant::now();
        let estimate = probe_homepage(&client, &settings, &domain).await;
        assert_eq!(estimate, PageEstimate::new(1, Method::HomepageOnly));
        assert!(started.elapsed() < Duration::from_secs(2));

        server.abort();
    }
}
