//! Feed Source Adapters
//!
//! Two remote IOC adapters (ThreatFox, URLhaus) and the local heuristics
//! generator. Remote failures never propagate: a failed fetch is logged
//! and surfaces as an empty batch, and the aggregator falls through its
//! chain instead.

pub mod threatfox;
pub mod urlhaus;
pub mod heuristics;

pub use threatfox::ThreatFoxClient;
pub use urlhaus::UrlHausClient;

use serde_json::Value;

/// Feed adapter errors. Consumed inside the adapters; callers only ever
/// see an empty batch.
#[derive(Debug, Clone)]
pub enum FeedError {
    NetworkError(String),
    ServerError(u16),
    ParseError(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError(e) => write!(f, "Network error: {}", e),
            Self::ServerError(code) => write!(f, "Server error: {}", code),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for FeedError {}

/// Extract the host part from a URL string (scheme stripped, path and
/// port dropped).
pub(crate) fn extract_host(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;

    let host = rest.split('/').next()?;
    let host = host.split(':').next()?;

    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Upstream id/asn fields arrive as either strings or bare numbers.
pub(crate) fn field_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_host() {
        assert_eq!(extract_host("https://evil.com/malware"), Some("evil.com".to_string()));
        assert_eq!(extract_host("http://bad.site:8080/path"), Some("bad.site".to_string()));
        assert_eq!(extract_host("HTTPSevil.com"), None);
        assert_eq!(extract_host("https://"), None);
    }

    #[test]
    fn test_field_string_shapes() {
        assert_eq!(field_string(&json!("abc")), Some("abc".to_string()));
        assert_eq!(field_string(&json!(12345)), Some("12345".to_string()));
        assert_eq!(field_string(&json!("")), None);
        assert_eq!(field_string(&Value::Null), None);
    }
}
