//! Where the counter's seed value comes from.

use async_trait::async_trait;
use serde::Deserialize;

/// Fetching the seed count failed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("count request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("count endpoint returned status {status}")]
    Rejected { status: u16 },
}

/// Provides the one-time seed for the signup counter.
#[async_trait]
pub trait CountSource: Send + Sync {
    async fn fetch_count(&self) -> Result<u64, SourceError>;
}

#[derive(Debug, Deserialize)]
struct CountPayload {
    count: u64,
}

/// Seeds the counter from `GET {base_url}/count`.
#[derive(Debug, Clone)]
pub struct HttpCountSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCountSource {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }
}

#[async_trait]
impl CountSource for HttpCountSource {
    async fn fetch_count(&self) -> Result<u64, SourceError> {
        let url = format!("{}/count", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Rejected {
                status: status.as_u16(),
            });
        }
        let payload: CountPayload = response.json().await?;
        Ok(payload.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let source = HttpCountSource::new(reqwest::Client::new(), "http://localhost:3000/");
        assert_eq!(source.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_payload_shape() {
        let payload: CountPayload = serde_json::from_str(r#"{"count": 1247}"#).unwrap();
        assert_eq!(payload.count, 1247);
    }
}
