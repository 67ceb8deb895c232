//! Error types for Mailsift operations.
//!
//! This module defines the main error type [`MailsiftError`] along with
//! [`DecodeError`], the dedicated error for malformed Cloudflare-obfuscated
//! email attributes.
//!
//! # Example
//!
//! ```rust
//! use mailsift_core::{DecodeError, decode_cfemail};
//!
//! match decode_cfemail("5a3f28") {
//!     Ok(decoded) => println!("decoded: {}", decoded),
//!     Err(DecodeError::TooShort { len }) => println!("only {} chars", len),
//!     Err(e) => println!("bad input: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error decoding a Cloudflare-obfuscated email attribute.
///
/// The encoded form is a hex string: the first byte pair is an XOR key and
/// every following pair is a cipher-text byte. The reference decoder silently
/// produced truncated output for malformed input; here malformed input is an
/// explicit failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input shorter than one key byte plus one cipher byte.
    #[error("encoded email too short ({len} chars, need at least 4)")]
    TooShort { len: usize },

    /// Input length is not a whole number of byte pairs.
    #[error("encoded email has odd length ({len} chars)")]
    OddLength { len: usize },

    /// A byte pair contained a non-hexadecimal character.
    #[error("invalid hex digits at offset {offset}")]
    InvalidHex { offset: usize },
}

/// Main error type for scraping operations.
///
/// Extraction and validation never raise errors of their own; an invalid or
/// duplicate candidate is a silent non-insert. Only malformed obfuscated
/// markup and (with the `crawl` feature) transport failures surface here.
#[derive(Error, Debug)]
pub enum MailsiftError {
    /// Malformed Cloudflare-obfuscated email attribute.
    #[error("failed to decode obfuscated email: {0}")]
    Decode(#[from] DecodeError),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "crawl")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[cfg(feature = "crawl")]
    #[error("request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a start URL cannot be parsed or has no host to crawl.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for MailsiftError.
pub type Result<T> = std::result::Result<T, MailsiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::TooShort { len: 2 };
        assert!(err.to_string().contains("2"));

        let err = DecodeError::InvalidHex { offset: 6 };
        assert!(err.to_string().contains("offset 6"));
    }

    #[test]
    fn test_decode_error_wraps() {
        let err = MailsiftError::from(DecodeError::OddLength { len: 5 });
        assert!(err.to_string().contains("odd length"));
    }

    #[test]
    fn test_invalid_url_display() {
        let err = MailsiftError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("not a url"));
    }
}
