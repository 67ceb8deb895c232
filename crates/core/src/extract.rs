//! Email pattern matching over raw page bodies.
//!
//! Patterns are compiled once into process-wide statics and are safe for
//! unsynchronized concurrent reads; extraction itself registers every valid
//! candidate into the session's [`EmailSet`].

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::collector::EmailSet;
use crate::decode::decode_cfemail;
use crate::error::DecodeError;

/// Matches `local@label.label...tld` with nested subdomains allowed.
/// The final label is validated separately as the TLD.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z0-9._-]+@([a-zA-Z0-9_-]+\.)+[a-zA-Z0-9_-]+)").expect("email pattern")
});

/// Matches obfuscated "at" separators such as `(at)`, `[AT]` or `(ate)`.
///
/// Token matching is case-insensitive and accepts mixed bracket styles;
/// every occurrence is rewritten to a literal `@` before the email scan.
static OBFUSCATED_AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[(\[](at|ate)[)\]]").expect("separator pattern"));

#[cfg(feature = "crawl")]
static CFEMAIL_SELECTOR: Lazy<scraper::Selector> =
    Lazy::new(|| scraper::Selector::parse("[data-cfemail]").expect("cfemail selector"));

/// Scans a raw page body and registers every valid address found.
///
/// Obfuscated "at" separators are normalized to `@` first, then all
/// non-overlapping matches of the email pattern are offered to `set`.
/// Returns the subsequence of matches that were newly inserted; invalid and
/// duplicate matches are silently dropped. A body with no matches yields an
/// empty vector, never an error.
///
/// # Example
///
/// ```rust
/// use mailsift_core::{EmailSet, extract_emails};
///
/// let set = EmailSet::new();
/// let found = extract_emails(&set, b"reach me at jane(at)example.org");
/// assert_eq!(found, vec!["jane@example.org".to_string()]);
/// ```
pub fn extract_emails(set: &EmailSet, body: &[u8]) -> Vec<String> {
    let normalized = OBFUSCATED_AT.replace_all(body, b"@".as_slice());

    EMAIL
        .find_iter(&normalized)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .filter(|candidate| set.try_insert(candidate))
        .collect()
}

/// Decodes one Cloudflare-obfuscated attribute value and registers the
/// address it contains.
///
/// Each attribute encodes exactly one address, so the decoded text is
/// matched once rather than scanned as free text. Returns the address if it
/// was newly inserted, `Ok(None)` if the decoded text held no address or the
/// address was a duplicate or invalid, and a [`DecodeError`] for malformed
/// input; the caller may skip that one element and continue.
pub fn extract_cfemail(set: &EmailSet, encoded: &str) -> Result<Option<String>, DecodeError> {
    let decoded = decode_cfemail(encoded)?;

    let Some(m) = EMAIL.find(decoded.as_bytes()) else {
        return Ok(None);
    };

    let candidate = String::from_utf8_lossy(m.as_bytes()).into_owned();

    if set.try_insert(&candidate) {
        Ok(Some(candidate))
    } else {
        Ok(None)
    }
}

/// Scans one HTML page: the raw body plus any `data-cfemail` attributes.
///
/// Convenience used by the crawler and by single-page (file or stdin) scans.
/// Malformed `data-cfemail` values are logged and skipped so a single broken
/// element never fails the page. Returns the newly inserted addresses.
#[cfg(feature = "crawl")]
pub fn scan_html(set: &EmailSet, html: &str) -> Vec<String> {
    let mut added = extract_emails(set, html.as_bytes());

    let document = scraper::Html::parse_document(html);
    added.extend(scan_cfemail_elements(set, &document));

    added
}

/// Registers the address behind every `data-cfemail` element of an
/// already-parsed document. Malformed values are logged and skipped.
#[cfg(feature = "crawl")]
pub(crate) fn scan_cfemail_elements(set: &EmailSet, document: &scraper::Html) -> Vec<String> {
    let mut added = Vec::new();

    for element in document.select(&CFEMAIL_SELECTOR) {
        let Some(encoded) = element.value().attr("data-cfemail") else {
            continue;
        };

        match extract_cfemail(set, encoded) {
            Ok(Some(email)) => added.push(email),
            Ok(None) => {}
            Err(e) => tracing::warn!(encoded, error = %e, "skipping malformed data-cfemail"),
        }
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_and_obfuscated() {
        let set = EmailSet::new();
        let body = b"Contact us at john.doe@example.com or jane(at)example.org for help";

        let found = extract_emails(&set, body);

        assert_eq!(
            found,
            vec![
                "john.doe@example.com".to_string(),
                "jane@example.org".to_string()
            ]
        );
    }

    #[test]
    fn test_separator_variants() {
        let set = EmailSet::new();
        let body = b"a[AT]example.com b(ATE)example.com c[at]example.com";

        let found = extract_emails(&set, body);

        assert_eq!(found.len(), 3);
        assert!(found.contains(&"a@example.com".to_string()));
        assert!(found.contains(&"b@example.com".to_string()));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let set = EmailSet::new();
        assert!(extract_emails(&set, b"nothing to see here").is_empty());
        assert!(extract_emails(&set, b"").is_empty());
    }

    #[test]
    fn test_duplicates_dropped_from_result() {
        let set = EmailSet::new();
        let body = b"a@example.com and again a@example.com";

        assert_eq!(extract_emails(&set, body).len(), 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_invalid_matches_dropped() {
        let set = EmailSet::new();
        // Shape matches but the endings fail validation.
        let body = b"sprite@2x.png version@file.2022";

        assert!(extract_emails(&set, body).is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn test_subdomains_matched() {
        let set = EmailSet::new();
        let found = extract_emails(&set, b"ops@mail.internal.example.co.uk ");
        assert_eq!(found, vec!["ops@mail.internal.example.co.uk".to_string()]);
    }

    #[test]
    fn test_extract_cfemail_inserts_decoded_address() {
        let set = EmailSet::new();
        // key 0x1a, plaintext "a@b.co"
        let result = extract_cfemail(&set, "1a7b5a78347975").unwrap();
        assert_eq!(result, Some("a@b.co".to_string()));

        // Same attribute again is a duplicate.
        assert_eq!(extract_cfemail(&set, "1a7b5a78347975").unwrap(), None);
    }

    #[test]
    fn test_extract_cfemail_malformed() {
        let set = EmailSet::new();
        assert!(extract_cfemail(&set, "1a7").is_err());
        assert!(extract_cfemail(&set, "xx7b5a").is_err());
        assert!(set.is_empty());
    }

    #[cfg(feature = "crawl")]
    #[test]
    fn test_scan_html_covers_body_and_cfemail() {
        let set = EmailSet::new();
        let html = r#"<html><body>
            <p>write to first@example.com</p>
            <a href="/contact"><span data-cfemail="1a7b5a78347975">[email protected]</span></a>
        </body></html>"#;

        let found = scan_html(&set, html);

        assert_eq!(found.len(), 2);
        assert!(found.contains(&"first@example.com".to_string()));
        assert!(found.contains(&"a@b.co".to_string()));
    }

    #[cfg(feature = "crawl")]
    #[test]
    fn test_scan_html_skips_malformed_cfemail() {
        let set = EmailSet::new();
        let html = r#"<span data-cfemail="zzzz">[email protected]</span>"#;

        assert!(scan_html(&set, html).is_empty());
    }
}
