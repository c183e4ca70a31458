//! Target URL validation.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL contains whitespace or control characters")]
    InvalidCharacters,
}

/// Checks that `input` is a well-formed absolute HTTP(S) URL.
///
/// The URL is validated, not rewritten: callers store the input exactly as
/// submitted so the redirect goes back to the same string. `Url::parse`
/// silently drops tabs and newlines and trims surrounding whitespace, so
/// those are rejected up front; the stored string must be usable as a
/// `Location` header as is.
///
/// Rejects schemes like `javascript:`, `data:` and `file:`.
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.chars().any(char::is_control) || input.trim() != input {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
