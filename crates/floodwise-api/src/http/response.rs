//! Success envelope shared by every endpoint.
//!
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 1 },
//!   "_links": { "self": "/api/v1/sessions/..." }
//! }
//! ```
//! Failures reuse `meta` with `"data": null` plus an `errors` list
//! (see [`crate::http::error::AppError`]).

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ApiMeta,
    /// Related resources, keyed by relation name.
    #[serde(rename = "_links", skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// UUID v7, so ids sort by arrival.
    pub request_id: String,
    /// RFC 3339.
    pub timestamp: String,
    pub response_time_ms: u64,
}

impl ApiMeta {
    /// Metadata for a request that started at `start`.
    pub fn since(start: Instant) -> Self {
        Self {
            request_id: Uuid::now_v7().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` with metadata timed from `start`.
    pub fn timed(data: T, start: Instant) -> Self {
        Self {
            data,
            meta: ApiMeta::since(start),
            links: BTreeMap::new(),
        }
    }

    pub fn with_link(mut self, rel: &'static str, href: &str) -> Self {
        self.links.insert(rel, href.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let resp = ApiResponse::timed(serde_json::json!({ "ok": true }), Instant::now())
            .with_link("self", "/api/v1/schema");
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["data"]["ok"], true);
        assert_eq!(value["_links"]["self"], "/api/v1/schema");
        let id: Uuid = value["meta"]["request_id"].as_str().unwrap().parse().unwrap();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_links_omitted_when_empty() {
        let value = serde_json::to_value(ApiResponse::timed(1, Instant::now())).unwrap();
        assert!(value.get("_links").is_none());
    }
}
