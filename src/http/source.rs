//! Submission source identification.

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

/// Key used when the request carries no address headers.
pub const LOOPBACK_PLACEHOLDER: &str = "127.0.0.1";

/// Derive the rate-limit key for a request.
///
/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then the loopback
/// placeholder. The value is used verbatim as an opaque key.
pub fn source_key(headers: &HeaderMap) -> String {
    header_value(headers, X_FORWARDED_FOR)
        .and_then(|list| list.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .or_else(|| header_value(headers, X_REAL_IP).map(str::trim).filter(|ip| !ip.is_empty()))
        .unwrap_or(LOOPBACK_PLACEHOLDER)
        .to_string()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
