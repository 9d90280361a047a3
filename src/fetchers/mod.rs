pub mod http;
pub mod webdriver;

use crate::config::{FetcherConfig, PageSpec};
use crate::error::{Error, Result};
use crate::parsers::extract_page_content;
use crate::results::{PageContent, PageInput};
use url::Url;

pub use http::HttpFetcher;
pub use webdriver::WebDriverFetcher;

/// Source of raw page markup
#[derive(Debug, Clone)]
pub enum Fetcher {
    Http(HttpFetcher),
    WebDriver(WebDriverFetcher),
}

impl Fetcher {
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        Ok(match config {
            FetcherConfig::Http(cfg) => Fetcher::Http(HttpFetcher::new(cfg)?),
            FetcherConfig::WebDriver(cfg) => Fetcher::WebDriver(WebDriverFetcher::new(cfg)),
        })
    }

    /// Fetches the raw markup at `url`
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| Error::Fetch {
            url: url.to_string(),
            message: format!("invalid URL: {e}"),
        })?;

        match self {
            Fetcher::Http(fetcher) => fetcher.fetch(&parsed).await,
            Fetcher::WebDriver(fetcher) => fetcher.fetch(&parsed).await,
        }
    }
}

/// Fetches and parses one page. Every failure is logged and reported as
/// absent content; nothing is retried.
pub async fn fetch_page_content(fetcher: &Fetcher, url: &str) -> Option<PageContent> {
    ::log::info!("Fetching content for {}", url);

    match fetcher.fetch(url).await {
        Ok(markup) => extract_page_content(&markup, url),
        Err(e) => {
            ::log::error!("Error fetching {}: {}", url, e);
            None
        }
    }
}

/// Fetches every page one after another, preserving input order
pub async fn fetch_all(fetcher: &Fetcher, pages: &[PageSpec]) -> Vec<PageInput> {
    let mut inputs = Vec::with_capacity(pages.len());

    for spec in pages {
        let content = fetch_page_content(fetcher, &spec.url).await;
        if content.is_none() {
            ::log::warn!("Could not fetch content for {}", spec.url);
        }
        inputs.push(PageInput::new(spec.url.clone(), spec.engagement, content));
    }

    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpFetcherConfig, WebDriverFetcherConfig};

    fn http_fetcher() -> Fetcher {
        Fetcher::from_config(&FetcherConfig::Http(HttpFetcherConfig::default())).unwrap()
    }

    #[test]
    fn test_fetcher_from_config() {
        assert!(matches!(http_fetcher(), Fetcher::Http(_)));

        let config = FetcherConfig::WebDriver(WebDriverFetcherConfig::default());
        match Fetcher::from_config(&config).unwrap() {
            Fetcher::WebDriver(fetcher) => {
                assert_eq!(fetcher.webdriver_url(), "http://localhost:4444")
            }
            other => panic!("expected WebDriver fetcher, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_is_a_fetch_error() {
        let result = http_fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(Error::Fetch { url, .. }) if url == "not a url"));
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_absent_content() {
        assert!(fetch_page_content(&http_fetcher(), "not a url").await.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let addr = crate::test_support::serve_status("404 Not Found").await;
        let url = format!("http://{addr}/landing");

        let fetcher = HttpFetcher::new(&HttpFetcherConfig::default()).unwrap();
        let result = fetcher.fetch(&Url::parse(&url).unwrap()).await;
        assert!(matches!(result, Err(Error::HttpStatus { status: 404, .. })));

        assert!(fetch_page_content(&http_fetcher(), &url).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_order_and_engagement() {
        let specs = vec![PageSpec::new("bad one", 0.85), PageSpec::new("bad two", 0.45)];
        let inputs = fetch_all(&http_fetcher(), &specs).await;

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].url, "bad one");
        assert_eq!(inputs[0].engagement, 0.85);
        assert_eq!(inputs[1].url, "bad two");
        assert!(inputs.iter().all(|p| p.content.is_none()));
    }
}
