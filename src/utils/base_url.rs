//! Base URL resolution for building short links.

use axum::http::{HeaderMap, header};

/// Fallback when neither a configured base URL nor a `Host` header is available.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Resolves the base URL that short codes are appended to.
///
/// Priority:
/// 1. `configured` (from `BASE_URL`), trailing `/` trimmed
/// 2. `Host` header, with the scheme from `X-Forwarded-Proto` or `http`
/// 3. [`DEFAULT_BASE_URL`]
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt".parse().unwrap());
/// assert_eq!(resolve_base_url(None, &headers), "http://sho.rt");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let Some(host) = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())
    else {
        return DEFAULT_BASE_URL.to_string();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "http".to_string());

    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn test_configured_base_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("ignored.com"));

        assert_eq!(
            resolve_base_url(Some("https://sho.rt/"), &headers),
            "https://sho.rt"
        );
    }

    #[test]
    fn test_host_header_with_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));

        assert_eq!(resolve_base_url(None, &headers), "http://localhost:8080");
    }

    #[test]
    fn test_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("HTTPS, http"));

        assert_eq!(resolve_base_url(None, &headers), "https://sho.rt");
    }

    #[test]
    fn test_unknown_forwarded_proto_falls_back_to_http() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("sho.rt"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("gopher"));

        assert_eq!(resolve_base_url(None, &headers), "http://sho.rt");
    }

    #[test]
    fn test_missing_host_uses_default() {
        assert_eq!(resolve_base_url(None, &HeaderMap::new()), DEFAULT_BASE_URL);
    }
}
