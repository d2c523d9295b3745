use crate::error::{FetchError, Result};
use async_trait::async_trait;

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    concat!("CardScanFetch/", env!("CARGO_PKG_VERSION"))
}

/// Plain GET access to the gallery, abstracted so the crawler can run against a mock.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a page and return its body as text
    async fn get_text(&self, url: &str) -> Result<String>;

    /// Fetch a resource and return its raw body
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production client backed by reqwest.
///
/// No request timeout is set; a server that never answers blocks the crawl.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", get_user_agent())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        tracing::debug!(url = %url, status = status.as_u16(), "GET completed");

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
    tracing::debug!(url = %url, error = %e, "HTTP request failed");
    FetchError::Transport {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_text(&self, url: &str) -> Result<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| transport_error(url, e))
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| transport_error(url, e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
pub use mock::MockHttpClient;
