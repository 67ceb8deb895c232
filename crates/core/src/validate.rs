//! Syntactic and semantic validity checks for matched candidates.

/// Checks whether a matched candidate looks like a real email address.
///
/// Rules are applied in order, short-circuiting on the first failure:
///
/// 1. The candidate must be non-empty.
/// 2. It must contain at least one `.` separating domain labels from a TLD.
/// 3. The final dot-segment must be at least 2 characters long.
/// 4. The final dot-segment must be a recognized public suffix. This filters
///    matches like image filenames (`sprite@2x.png` has `png` rejected) and
///    generic trailing tokens that merely look like a TLD.
/// 5. The final dot-segment must not parse as an integer (`file.2022`).
///
/// The candidate itself is never normalized; it is validated byte-for-byte
/// as matched. Only the suffix lookup lowercases its input, since the public
/// suffix list is stored lowercase.
///
/// # Example
///
/// ```rust
/// use mailsift_core::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(!is_valid_email("user@example"));
/// assert!(!is_valid_email("icon@site.a"));
/// ```
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }

    let Some((_, ending)) = candidate.rsplit_once('.') else {
        return false;
    };

    if ending.len() < 2 {
        return false;
    }

    if !is_known_tld(ending) {
        return false;
    }

    if ending.parse::<i64>().is_ok() {
        return false;
    }

    true
}

/// Reports whether `ending` is a recognized top-level domain.
///
/// Backed by the compiled public suffix list; unlisted labels fall under the
/// list's implicit wildcard rule and are not treated as known.
fn is_known_tld(ending: &str) -> bool {
    let lowered = ending.to_ascii_lowercase();

    psl::suffix(lowered.as_bytes()).is_some_and(|suffix| suffix.is_known())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com", true)]
    #[case("john.doe@mail.example.org", true)]
    #[case("a@b.co", true)]
    #[case("", false)]
    #[case("a@b", false)] // no dot
    #[case("icon@site.a", false)] // ending shorter than 2 chars
    #[case("user@example.2", false)] // ending shorter than 2 chars
    #[case("user@example.2022", false)] // numeric ending
    #[case("sprite@2x.png", false)] // not a registered TLD
    #[case("header@logo.jpeg", false)] // not a registered TLD
    #[case("user@example.notarealtld", false)]
    fn test_is_valid_email(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(candidate), expected, "{candidate}");
    }

    #[test]
    fn test_tld_lookup_ignores_case() {
        assert!(is_valid_email("user@example.COM"));
    }

    #[test]
    fn test_known_tlds() {
        assert!(is_known_tld("com"));
        assert!(is_known_tld("org"));
        assert!(is_known_tld("co"));
        assert!(!is_known_tld("zzzzzz"));
    }
}
