//! Text fetchers for the remote skill database
//!
//! The loaders only need "fetch the body at this URL as text". `HttpFetcher`
//! does that over HTTP; `StaticFetcher` serves fixed bodies from memory for
//! offline runs and tests.

use crate::core::error::{DbError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Source of remote text documents
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetch the body at `url`.
    ///
    /// Transport failures and non-success responses are `SourceUnavailable`.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher backed by a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DbError::SourceUnavailable(format!("HTTP client setup: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DbError::SourceUnavailable(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DbError::SourceUnavailable(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DbError::SourceUnavailable(format!("{}: {}", url, e)))
    }
}

/// In-memory fetcher serving fixed bodies by URL
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl SourceFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| DbError::SourceUnavailable(format!("{}: not found", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_creation() {
        assert!(HttpFetcher::new(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_static_fetcher_serves_registered_bodies() {
        let fetcher = StaticFetcher::new().with("mem://pointer", "mem://db\n");

        let body = fetcher.fetch_text("mem://pointer").await.unwrap();
        assert_eq!(body, "mem://db\n");

        let missing = fetcher.fetch_text("mem://other").await;
        assert!(matches!(missing, Err(DbError::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_http_fetcher_unreachable_host() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();
        // Port 9 on loopback: nothing listens there in test environments
        let result = fetcher.fetch_text("http://127.0.0.1:9/dburl.txt").await;
        assert!(matches!(result, Err(DbError::SourceUnavailable(_))));
    }
}
