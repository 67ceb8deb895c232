//! Breadth-first domain crawler feeding the extraction engine.
//!
//! The crawler owns all concurrency: each depth level's pages are fetched in
//! parallel and every page worker funnels its findings into one shared
//! [`EmailSet`]. The extraction core itself spawns no tasks.

use std::collections::HashSet;

use futures::StreamExt;
use futures::stream;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::collector::EmailSet;
use crate::extract::{extract_emails, scan_cfemail_elements};
use crate::fetch::{FetchConfig, build_client, fetch_page};
use crate::{MailsiftError, Result};

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("link selector"));

/// Configuration for a crawl session.
///
/// # Example
///
/// ```rust
/// use mailsift_core::CrawlConfig;
///
/// let config = CrawlConfig { max_depth: 1, ..Default::default() };
/// assert_eq!(config.max_pages, 100);
/// ```
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// How many link hops to follow from the start page (0 = start page only).
    pub max_depth: usize,
    /// Upper bound on fetched pages per crawl.
    pub max_pages: usize,
    /// How many pages to fetch in parallel within one depth level.
    pub concurrency: usize,
    /// Whether to follow links leaving the start host.
    pub follow_external_links: bool,
    /// HTTP client settings.
    pub fetch: FetchConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 100,
            concurrency: 8,
            follow_external_links: false,
            fetch: FetchConfig::default(),
        }
    }
}

/// Outcome of one crawl session.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    /// The input the caller asked to scrape, as given.
    pub requested_url: String,
    /// Pages successfully fetched and scanned.
    pub pages_crawled: usize,
    /// Distinct valid addresses, in discovery order.
    pub emails: Vec<String>,
}

/// Crawls a domain and collects the email addresses found on its pages.
///
/// # Example
///
/// ```rust,no_run
/// use mailsift_core::{CrawlConfig, Scraper};
///
/// # async fn example() -> mailsift_core::Result<()> {
/// let scraper = Scraper::new(CrawlConfig::default());
/// let report = scraper.scrape("example.com").await?;
/// for email in &report.emails {
///     println!("{email}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Scraper {
    config: CrawlConfig,
}

impl Scraper {
    /// Creates a scraper with the given configuration.
    pub fn new(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Crawls starting from `input` and returns every address found.
    ///
    /// Any scheme on the input is ignored: the crawl starts over `https` and
    /// retries once over plain `http` if the secure crawl surfaced nothing,
    /// since some older sites only answer insecurely. Individual page
    /// failures are logged and skipped; partial results are valid.
    pub async fn scrape(&self, input: &str) -> Result<ScrapeReport> {
        let client = build_client(&self.config.fetch)?;
        let set = EmailSet::new();

        let mut pages_crawled = self
            .crawl(&client, &set, start_url(input, true)?)
            .await;

        if set.is_empty() {
            debug!(input, "no addresses over https, retrying insecure");
            pages_crawled += self.crawl(&client, &set, start_url(input, false)?).await;
        }

        Ok(ScrapeReport {
            requested_url: input.to_string(),
            pages_crawled,
            emails: set.snapshot(),
        })
    }

    /// Breadth-first crawl from `start`, one concurrent fetch batch per
    /// depth level. Returns the number of pages fetched successfully.
    async fn crawl(&self, client: &reqwest::Client, set: &EmailSet, start: Url) -> usize {
        let allowed_host = if self.config.follow_external_links {
            None
        } else {
            start.host_str().map(str::to_string)
        };

        let mut visited: HashSet<Url> = HashSet::new();
        visited.insert(start.clone());

        let mut frontier = vec![start];
        let mut pages_crawled = 0;

        for depth in 0..=self.config.max_depth {
            if frontier.is_empty() || pages_crawled >= self.config.max_pages {
                break;
            }

            frontier.truncate(self.config.max_pages - pages_crawled);

            let fetched: Vec<(Url, Result<String>)> = stream::iter(frontier.drain(..))
                .map(|url| async move {
                    let body = fetch_page(client, &url, &self.config.fetch).await;
                    (url, body)
                })
                .buffer_unordered(self.config.concurrency.max(1))
                .collect()
                .await;

            let mut next = Vec::new();

            for (url, result) in fetched {
                let body = match result {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(page = %url, error = %e, "failed to fetch page");
                        continue;
                    }
                };

                pages_crawled += 1;

                for link in self.process_page(set, &url, &body) {
                    if depth < self.config.max_depth
                        && host_allowed(&link, allowed_host.as_deref())
                        && visited.insert(link.clone())
                    {
                        next.push(link);
                    }
                }
            }

            frontier = next;
        }

        pages_crawled
    }

    /// Scans one fetched page and returns the outbound links it carries.
    fn process_page(&self, set: &EmailSet, url: &Url, body: &str) -> Vec<Url> {
        let mut added = extract_emails(set, body.as_bytes());

        let document = Html::parse_document(body);
        added.extend(scan_cfemail_elements(set, &document));

        if !added.is_empty() {
            debug!(page = %url, count = added.len(), emails = ?added, "new addresses found");
        }

        document
            .select(&LINK_SELECTOR)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_link(url, href))
            .collect()
    }
}

/// Builds the start URL, forcing the requested scheme onto the bare host.
fn start_url(input: &str, secure: bool) -> Result<Url> {
    let trimmed = trim_scheme(input.trim());
    let scheme = if secure { "https" } else { "http" };

    let url = Url::parse(&format!("{scheme}://{trimmed}"))
        .map_err(|e| MailsiftError::InvalidUrl(format!("{input}: {e}")))?;

    if url.host_str().is_none() {
        return Err(MailsiftError::InvalidUrl(format!("{input}: no host to crawl")));
    }

    Ok(url)
}

fn trim_scheme(input: &str) -> &str {
    input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input)
}

fn host_allowed(link: &Url, allowed_host: Option<&str>) -> bool {
    match allowed_host {
        Some(host) => link.host_str() == Some(host),
        None => true,
    }
}

/// Resolves an href against the page it appeared on.
///
/// Fragments, mail/tel links and script pseudo-URLs are skipped; relative
/// paths are joined onto the page URL. Anything that is not http(s) after
/// resolution is dropped, and fragments are stripped so the visited set does
/// not refetch the same page per anchor.
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);

    Some(url)
}
