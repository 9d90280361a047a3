use crate::config::HttpFetcherConfig;
use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Retrieves page markup with a plain HTTP GET
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpFetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the body of `url`; any non-success status is an error.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| Error::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        ::log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
