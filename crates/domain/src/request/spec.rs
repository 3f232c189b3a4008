use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Headers, HttpMethod, RequestBody};

/// Everything needed to send one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Time-ordered id, used to correlate log lines.
    pub id: Uuid,
    /// Verb.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: String,
    /// Extra headers, sent in order.
    #[serde(default)]
    pub headers: Headers,
    /// Payload.
    #[serde(default)]
    pub body: RequestBody,
    /// Client-side timeout. `None` lets the call run to completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestSpec {
    /// A bare request: no headers, no body, no timeout.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::Empty,
            timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_request_is_bare() {
        let req = RequestSpec::new(HttpMethod::Get, "https://jsonplaceholder.typicode.com/posts/2");
        assert_eq!(req.url, "https://jsonplaceholder.typicode.com/posts/2");
        assert!(req.headers.is_empty());
        assert!(req.body.is_empty());
        assert_eq!(req.timeout_ms, None);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = RequestSpec::new(HttpMethod::Delete, "https://example.com/posts/3");
        let b = RequestSpec::new(HttpMethod::Delete, "https://example.com/posts/3");
        assert_ne!(a.id, b.id);
    }
}
