//! Crawl a web domain and extract the unique, valid email addresses its
//! pages expose, including addresses hidden behind Cloudflare's
//! `data-cfemail` obfuscation and `(at)`-style separator tricks.
//!
//! The extraction engine ([`EmailSet`], [`extract_emails`],
//! [`decode_cfemail`], [`is_valid_email`]) has no I/O of its own and is safe
//! to drive from any number of concurrent page workers. The `crawl` feature
//! (on by default) adds the async [`Scraper`] that fetches and walks a
//! domain.
//!
//! # Example
//!
//! ```rust
//! use mailsift_core::{EmailSet, extract_emails};
//!
//! let set = EmailSet::new();
//! extract_emails(&set, b"sales(at)example.com or support@example.com");
//! assert_eq!(set.len(), 2);
//! ```

pub mod collector;
#[cfg(feature = "crawl")]
pub mod crawl;
pub mod decode;
pub mod error;
pub mod extract;
#[cfg(feature = "crawl")]
pub mod fetch;
pub mod validate;

pub use collector::EmailSet;
#[cfg(feature = "crawl")]
pub use crawl::{CrawlConfig, ScrapeReport, Scraper};
pub use decode::decode_cfemail;
pub use error::{DecodeError, MailsiftError, Result};
pub use extract::{extract_cfemail, extract_emails};
#[cfg(feature = "crawl")]
pub use extract::scan_html;
#[cfg(feature = "crawl")]
pub use fetch::{FetchConfig, fetch_url};
pub use validate::is_valid_email;
