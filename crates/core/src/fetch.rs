//! Page fetching for the crawler.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{MailsiftError, Result};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Mailsift/0.2; +https://github.com/mailsift/mailsift)".to_string(),
        }
    }
}

/// Builds the shared client used for one crawl session.
pub(crate) fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(MailsiftError::Http)
}

/// Fetches one page and returns the response body as text.
///
/// Follows redirects, respects the configured timeout, and sends
/// browser-like headers for better compatibility with bot-hostile sites.
pub(crate) async fn fetch_page(client: &Client, url: &Url, config: &FetchConfig) -> Result<String> {
    let response = client
        .get(url.clone())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                MailsiftError::Timeout { timeout: config.timeout }
            } else {
                MailsiftError::Http(e)
            }
        })?;

    let body = response.text().await?;

    Ok(body)
}

/// Fetches HTML content from a URL using a one-off client.
///
/// Standalone variant of the crawler's internal fetch, for callers that want
/// a single page without a crawl session.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| MailsiftError::InvalidUrl(e.to_string()))?;

    let client = build_client(config)?;

    fetch_page(&client, &parsed, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Mailsift"));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(MailsiftError::InvalidUrl(_))));
    }
}
