// Derives everything the responder needs from the inbound request

use std::collections::HashMap;

use axum::http::{header, HeaderMap};
use once_cell::sync::Lazy;
use regex::Regex;

static SHARE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/c/([^/?#]+)").expect("share path regex should compile"));

// Hosts that are served over plain http no matter what a proxy claims
const LOOPBACK_PREFIXES: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    // Empty when neither `?id=` nor `/c/<id>` carried one
    pub listing_id: String,
    // Suppress the human redirect and show what scrapers see
    pub debug: bool,
    // `scheme://host`, or None when the request had no Host header
    pub origin: Option<String>,
}

impl PreviewRequest {
    pub fn from_parts(path: &str, query: &HashMap<String, String>, headers: &HeaderMap) -> Self {
        let listing_id = extract_listing_id(query.get("id").map(String::as_str), path);
        let debug = query.get("debug").is_some_and(|v| !v.is_empty());
        let origin = derive_origin(headers);

        Self {
            listing_id,
            debug,
            origin,
        }
    }
}

// Query parameter wins; otherwise the percent-decoded `/c/<segment>` of the path
pub fn extract_listing_id(query_id: Option<&str>, path: &str) -> String {
    let from_query = query_id.unwrap_or_default().trim();
    if !from_query.is_empty() {
        return from_query.to_string();
    }

    SHARE_PATH
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|segment| {
            let raw = segment.as_str();
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
        .map(|id| id.trim().to_string())
        .unwrap_or_default()
}

pub fn is_loopback_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    LOOPBACK_PREFIXES.iter().any(|prefix| host.starts_with(prefix))
}

// Local dev proxies sometimes report https for localhost, so loopback hosts always get http
pub fn derive_origin(headers: &HeaderMap) -> Option<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty())?;

    let scheme = if is_loopback_host(host) {
        "http".to_string()
    } else {
        headers
            .get("x-forwarded-proto")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|proto| !proto.is_empty())
            .unwrap_or("https")
            .to_string()
    };

    Some(format!("{}://{}", scheme, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn query_id_is_preferred_and_trimmed() {
        assert_eq!(extract_listing_id(Some("  abc123 "), "/c/other"), "abc123");
    }

    #[test]
    fn blank_query_id_falls_back_to_path() {
        assert_eq!(extract_listing_id(Some("   "), "/c/from-path"), "from-path");
    }

    #[test]
    fn path_segment_is_percent_decoded() {
        assert_eq!(extract_listing_id(None, "/c/car%20one"), "car one");
    }

    #[test]
    fn undecodable_segment_is_used_raw() {
        assert_eq!(extract_listing_id(None, "/c/%E0%A4%A"), "%E0%A4%A");
    }

    #[test]
    fn share_segment_may_follow_a_prefix() {
        assert_eq!(extract_listing_id(None, "/share/c/xyz/extra"), "xyz");
    }

    #[test]
    fn no_identifier_is_empty() {
        assert_eq!(extract_listing_id(None, "/c/"), "");
        assert_eq!(extract_listing_id(None, "/share"), "");
    }

    #[test]
    fn loopback_detection_is_case_insensitive_prefix() {
        assert!(is_loopback_host("LOCALHOST:8888"));
        assert!(is_loopback_host("127.0.0.1:3000"));
        assert!(is_loopback_host("0.0.0.0"));
        assert!(!is_loopback_host("vinvel.com"));
    }

    #[test]
    fn loopback_overrides_forwarded_proto() {
        let origin = derive_origin(&headers(&[
            ("host", "localhost:8888"),
            ("x-forwarded-proto", "https"),
        ]));
        assert_eq!(origin.as_deref(), Some("http://localhost:8888"));
    }

    #[test]
    fn first_forwarded_proto_is_used() {
        let origin = derive_origin(&headers(&[
            ("host", "vinvel.com"),
            ("x-forwarded-proto", "http, https"),
        ]));
        assert_eq!(origin.as_deref(), Some("http://vinvel.com"));
    }

    #[test]
    fn https_is_the_default_scheme() {
        let origin = derive_origin(&headers(&[("host", "vinvel.com")]));
        assert_eq!(origin.as_deref(), Some("https://vinvel.com"));
    }

    #[test]
    fn missing_host_means_no_origin() {
        assert!(derive_origin(&HeaderMap::new()).is_none());
    }

    #[test]
    fn debug_flag_needs_a_value() {
        let mut query = HashMap::new();
        query.insert("id".to_string(), "car-1".to_string());
        query.insert("debug".to_string(), "1".to_string());
        let request = PreviewRequest::from_parts("/share", &query, &HeaderMap::new());
        assert!(request.debug);
        assert_eq!(request.listing_id, "car-1");

        query.insert("debug".to_string(), String::new());
        let request = PreviewRequest::from_parts("/share", &query, &HeaderMap::new());
        assert!(!request.debug);
    }
}
