//! Public base URL resolution for building short links.

use axum::http::{HeaderMap, header};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the base URL short links should be built on.
///
/// A configured base always wins. Otherwise the base is derived from the
/// `Host` header, with the scheme taken from `X-Forwarded-Proto` (only
/// `http` and `https` are accepted, defaulting to `http`). Falls back to
/// `http://localhost` when no usable `Host` header is present.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt".parse().unwrap());
///
/// assert_eq!(resolve_base_url(None, &headers), "http://sho.rt");
/// assert_eq!(resolve_base_url(Some("https://x.io"), &headers), "https://x.io");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost");

    let scheme = match headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_ascii_lowercase())
    {
        Some(proto) if proto == "https" => "https",
        _ => "http",
    };

    format!("{scheme}://{host}")
}
