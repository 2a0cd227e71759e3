use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::{AppError, Result};

#[async_trait]
pub trait CsvSource {
    /// Fetch the raw body behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpCsvSource {
    client: reqwest::Client,
}

impl HttpCsvSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("anydem/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CsvSource for HttpCsvSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::FetchError(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::FetchError(format!("Failed to read body of {}: {}", url, e)))?;

        debug!(url, bytes = body.len(), "Fetched CSV");
        Ok(body.to_vec())
    }
}

/// In-memory source keyed by URL, standing in for the network in tests.
#[cfg(test)]
#[derive(Default)]
pub struct StaticCsvSource {
    bodies: std::collections::HashMap<String, Vec<u8>>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StaticCsvSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl CsvSource for StaticCsvSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::FetchError(format!("GET {} returned HTTP 404 Not Found", url)))
    }
}
