use crate::config::WebDriverFetcherConfig;
use crate::error::{Error, Result};
use fantoccini::{Client, ClientBuilder};
use url::Url;

/// Retrieves rendered page source through a WebDriver server.
///
/// A fresh session is opened per page and closed afterwards.
#[derive(Debug, Clone)]
pub struct WebDriverFetcher {
    webdriver_url: String,
}

impl WebDriverFetcher {
    pub fn new(config: &WebDriverFetcherConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
        }
    }

    pub fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }

    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let client = self.connect(url).await?;

        let source = scrape(&client, url).await;

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        source
    }

    async fn connect(&self, url: &Url) -> Result<Client> {
        match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                Ok(client)
            }
            Err(e) => {
                ::log::error!(
                    "Make sure a WebDriver server is running at {} or set the WEBDRIVER_URL environment variable",
                    self.webdriver_url
                );
                Err(Error::Fetch {
                    url: url.to_string(),
                    message: format!("WebDriver connection failed: {e}"),
                })
            }
        }
    }
}

async fn scrape(client: &Client, url: &Url) -> Result<String> {
    client
        .goto(url.as_str())
        .await
        .map_err(|e| navigation_error(e, "accessing", url))?;

    client
        .source()
        .await
        .map_err(|e| navigation_error(e, "getting source for", url))
}

fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &Url) -> Error {
    Error::Fetch {
        url: url.to_string(),
        message: format!("failed {context} page: {error}"),
    }
}
