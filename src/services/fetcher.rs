use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a single source could not be fetched. One bad source never aborts
/// the run; the pipeline logs the reason and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("playlist too large: {size_mb:.1}MB (limit {limit_mb}MB)")]
    TooLarge { size_mb: f64, limit_mb: usize },
}

/// HTTP fetcher for playlist sources
pub struct SourceFetcher {
    client: Client,
    max_m3u_size_mb: usize,
}

impl SourceFetcher {
    pub fn new(user_agent: &str, timeout_ms: u64, max_m3u_size_mb: usize) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_millis(timeout_ms))
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_m3u_size_mb,
        }
    }

    /// Fetch the full text of one source. A single attempt, bounded by the
    /// client timeout; the URL is validated before any network I/O.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = Url::parse(url)?;

        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        if let Some(len) = resp.content_length() {
            let max_bytes = (self.max_m3u_size_mb as u64) * 1024 * 1024;
            if len > max_bytes {
                return Err(FetchError::TooLarge {
                    size_mb: len as f64 / 1024.0 / 1024.0,
                    limit_mb: self.max_m3u_size_mb,
                });
            }
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_rejected_before_any_request() {
        let fetcher = SourceFetcher::new("test-agent", 1_000, 10);
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
