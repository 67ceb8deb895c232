//! Decoder for Cloudflare's email obfuscation scheme.
//!
//! Pages protected by Cloudflare replace plaintext addresses with an element
//! carrying a `data-cfemail` attribute; client-side script decodes it for
//! display. The attribute value is a hex string: the first byte pair is an
//! XOR key and every following pair is one cipher-text byte.

use crate::error::DecodeError;

/// Decodes a `data-cfemail` attribute value back into plaintext.
///
/// The first two hex characters are parsed as the XOR key; each subsequent
/// hex pair is XORed against the key and appended as a Latin-1 code point.
/// Decoding is pure and stateless.
///
/// Malformed input (fewer than 4 characters, odd length, non-hex digits)
/// fails with a [`DecodeError`] rather than producing truncated output.
///
/// # Example
///
/// ```rust
/// use mailsift_core::decode_cfemail;
///
/// // key 0x1a, plaintext "a@b.co"
/// let decoded = decode_cfemail("1a7b5a78347975").unwrap();
/// assert_eq!(decoded, "a@b.co");
/// ```
pub fn decode_cfemail(encoded: &str) -> Result<String, DecodeError> {
    let len = encoded.len();

    if len < 4 {
        return Err(DecodeError::TooShort { len });
    }

    if len % 2 != 0 {
        return Err(DecodeError::OddLength { len });
    }

    let key = parse_hex_pair(encoded, 0)?;

    let mut decoded = String::with_capacity(len / 2 - 1);

    for offset in (2..len).step_by(2) {
        let byte = parse_hex_pair(encoded, offset)?;
        decoded.push(char::from(byte ^ key));
    }

    Ok(decoded)
}

fn parse_hex_pair(encoded: &str, offset: usize) -> Result<u8, DecodeError> {
    // from_str_radix tolerates a leading sign, which is not valid hex here.
    let pair = encoded
        .get(offset..offset + 2)
        .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or(DecodeError::InvalidHex { offset })?;

    u8::from_str_radix(pair, 16).map_err(|_| DecodeError::InvalidHex { offset })
}
