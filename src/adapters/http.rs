use crate::domain::ports::{FetchResponse, Fetcher};
use crate::utils::error::Result;
use reqwest::Client;

/// One HTTP GET per call, no retries. Base-URL fallback lives in the
/// aggregator, not here.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("GET {} -> {}", url, status);
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}
