use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

use super::PageFetcher;
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

/// Fetches listing pages over HTTP. No retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Self::with_settings(config.request_timeout, &config.user_agent)
    }

    pub fn with_settings(timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("fr-FR,fr;q=0.9,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(ScrapeError::HttpClient)?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::transport(url, format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, e))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching listing page");

        match self.get(url).await {
            Ok(html) => {
                debug!(url = %url, bytes = html.len(), "Fetched listing page");
                Ok(html)
            }
            Err(e) => {
                error!(url = %url, error = %e, "Error fetching data");
                Err(e)
            }
        }
    }
}
