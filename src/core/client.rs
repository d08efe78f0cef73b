use crate::domain::ports::FeedSource;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Single-shot HTTP GET against a feed endpoint. No retries; each call stands alone.
#[derive(Debug, Clone, Default)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn check_request(url: &str, timeout: Duration) -> Result<Url, FetchError> {
        if timeout.is_zero() {
            return Err(FetchError::InvalidRequest {
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidRequest {
            reason: format!("invalid URL '{}': {}", url, e),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(FetchError::InvalidRequest {
                reason: format!("unsupported URL scheme: {}", scheme),
            }),
        }
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let url = Self::check_request(url, timeout)?;

        tracing::debug!("Making feed request to: {} (timeout {:?})", url, timeout);

        // The per-request timeout spans connect, send and the full body read.
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        tracing::debug!("Feed response status: {}", status);

        if status != StatusCode::OK {
            return Err(FetchError::BadStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::from_reqwest)?;
        tracing::debug!("Read {} bytes from feed", body.len());

        Ok(body.to_vec())
    }
}
