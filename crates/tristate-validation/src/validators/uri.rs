//! URL rules: `url`, `requrl`, `requri`

use std::borrow::Cow;
use url::{Host, Url};

/// A URL with a dotted host, `localhost` or an IP address.
///
/// The scheme may be omitted, in which case `http` is assumed. Length must be
/// greater than 3 and below `max_length` bytes.
pub fn is_url(value: &str, max_length: usize) -> bool {
    if value.len() <= 3 || value.len() >= max_length || value.starts_with('.') {
        return false;
    }

    let candidate = if value.contains("://") {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("http://{}", value))
    };

    let parsed = match Url::parse(&candidate) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    match parsed.host() {
        Some(Host::Domain(domain)) => {
            !domain.starts_with('.') && (domain.contains('.') || domain == "localhost")
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// An absolute URI with a scheme, as received in a request line
pub fn is_request_url(value: &str) -> bool {
    is_request_target(value) && absolute(value)
}

/// An absolute URI or an absolute path, as received in a request line
pub fn is_request_uri(value: &str) -> bool {
    if !is_request_target(value) {
        return false;
    }
    if value.starts_with('/') {
        return Url::parse("http://h").and_then(|base| base.join(value)).is_ok();
    }
    absolute(value)
}

/// Request targets never carry whitespace or control characters; `Url::parse`
/// would silently strip or encode them.
fn is_request_target(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c.is_control() || c.is_whitespace())
}

fn absolute(value: &str) -> bool {
    match Url::parse(value) {
        Ok(parsed) => !(parsed.cannot_be_a_base() && parsed.path().is_empty()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        let cases = [
            ("", false),
            ("http://sample.com", true),
            ("https://sam.ple.com/", true),
            ("ftp://sample.abc/", true),
            ("/abc/def/ghi", false),
            ("http://sample.com:1234", true),
            ("http://sample.com:123456", false),
            ("abc", false),
            ("sample.com/path", true),
            ("http://localhost:8080", true),
            (".sample.com", false),
        ];
        for (input, expected) in cases {
            assert_eq!(is_url(input, 2083), expected, "is_url({:?})", input);
        }
    }

    #[test]
    fn test_is_url_respects_max_length() {
        assert!(!is_url("http://sample.com", 10));
    }

    #[test]
    fn test_is_request_url() {
        let cases = [
            ("", false),
            ("http://sample.com", true),
            ("https://sam.ple.com/", true),
            ("ftp://sample.abc/", true),
            ("/abc/def/ghi", false),
            ("http://sample.com:1234", true),
            ("http://sample.com:123456", false),
            ("abc", false),
            ("http://[::1", false),
            ("http://%zz/", false),
            ("a:", false),
            ("http://exaémple.com:99999999", false),
            ("mailto:ann@example.com", true),
        ];
        for (input, expected) in cases {
            assert_eq!(is_request_url(input), expected, "is_request_url({:?})", input);
        }
    }

    #[test]
    fn test_is_request_uri() {
        let cases = [
            ("", false),
            ("http://sample.com", true),
            ("https://sam.ple.com/", true),
            ("ftp://sample.abc/", true),
            ("/abc/def/ghi", true),
            ("http://sample.com:1234", true),
            ("http://sample.com:123456", false),
            ("abc", false),
            ("/with space", false),
            ("http://[::1", false),
            ("http://%zz/", false),
            ("a:", false),
            ("http://exaémple.com:99999999", false),
            ("/search?q=rust#top", true),
        ];
        for (input, expected) in cases {
            assert_eq!(is_request_uri(input), expected, "is_request_uri({:?})", input);
        }
    }
}
