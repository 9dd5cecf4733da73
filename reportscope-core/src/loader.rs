//! HTTP client for the index document.
//!
//! The index is fetched exactly once at startup; failures are surfaced to
//! the caller without any automatic retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::index::ReportIndex;

/// HTTP client for fetching the report index.
pub struct IndexClient {
    config: IndexConfig,
    http_client: reqwest::Client,
}

impl IndexClient {
    /// Create a new index client from configuration
    ///
    /// Returns an error if the configuration is unusable.
    pub fn new(config: IndexConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::Config("index.url must not be empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The configured index URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fetch and parse the index document.
    ///
    /// Performs a single GET of the configured URL. Every failure mode maps
    /// to [`Error::Load`]: transport errors and parse failures carry no
    /// status, a non-success response carries its HTTP status code.
    pub async fn fetch_index(&self) -> Result<ReportIndex> {
        tracing::info!(url = %self.config.url, "Fetching report index");

        let response = self
            .http_client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| Error::Load {
                status: None,
                message: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Load {
                status: Some(status.as_u16()),
                message: format!(
                    "{} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("request failed")
                ),
            });
        }

        let body = response.text().await.map_err(|e| Error::Load {
            status: None,
            message: format!("failed to read response body: {}", e),
        })?;

        let index = ReportIndex::from_json(&body).map_err(|e| match e {
            load @ Error::Load { .. } => load,
            other => Error::Load {
                status: None,
                message: format!("failed to parse index: {}", other),
            },
        })?;

        tracing::info!(projects = index.len(), "Report index loaded");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;

    #[test]
    fn test_client_requires_url() {
        let config = IndexConfig {
            url: "  ".to_string(),
            timeout_secs: 30,
        };
        assert!(IndexClient::new(config).is_err());
    }

    #[test]
    fn test_client_with_valid_config() {
        let config = IndexConfig {
            url: "https://bucket.example.com/reports.json".to_string(),
            timeout_secs: 30,
        };
        let client = IndexClient::new(config).unwrap();
        assert_eq!(client.url(), "https://bucket.example.com/reports.json");
    }

    #[tokio::test]
    async fn test_unreachable_origin_maps_to_load_error() {
        // Reserved TEST-NET-1 address; connect fails fast with no server.
        let config = IndexConfig {
            url: "http://192.0.2.1/reports.json".to_string(),
            timeout_secs: 1,
        };
        let client = IndexClient::new(config).unwrap();
        match client.fetch_index().await {
            Err(Error::Load { status, .. }) => assert_eq!(status, None),
            other => panic!("expected Load error, got {:?}", other.map(|_| ())),
        }
    }

    /// Serve one canned HTTP response on a loopback socket and return the
    /// index URL pointing at it.
    fn serve_once(response: String) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/reports.json", addr)
    }

    async fn fetch_from(response: String) -> Result<ReportIndex> {
        let config = IndexConfig {
            url: serve_once(response),
            timeout_secs: 5,
        };
        IndexClient::new(config).unwrap().fetch_index().await
    }

    #[tokio::test]
    async fn test_not_found_carries_status() {
        let result = fetch_from(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n".to_string(),
        )
        .await;
        match result {
            Err(Error::Load { status, message }) => {
                assert_eq!(status, Some(404));
                assert!(message.contains("404"));
            }
            other => panic!("expected Load error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_unparsable_body_maps_to_load_error() {
        let result = fetch_from(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 8\r\nconnection: close\r\n\r\nnot-json"
                .to_string(),
        )
        .await;
        match result {
            Err(Error::Load { status, message }) => {
                assert_eq!(status, None);
                assert!(message.contains("parse"));
            }
            other => panic!("expected Load error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_success_body_parses() {
        let body = r#"{"proj1": {"2024-01-01": ["a.html"]}}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let index = fetch_from(response).await.unwrap();
        assert_eq!(index.projects(), vec!["proj1"]);
        assert_eq!(index.reports("proj1", "2024-01-01"), ["a.html"]);
    }
}
