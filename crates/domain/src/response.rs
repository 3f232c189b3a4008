//! What came back from the API, captured once and then only read.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A received response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Numeric status.
    pub status: u16,
    /// Headers keyed by name. Repeated headers are joined with `", "`.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Body as (lossy) UTF-8.
    pub body: String,
    /// Body exactly as received.
    #[serde(default, skip_serializing)]
    pub body_bytes: Vec<u8>,
    /// From sending the request until the last body byte arrived.
    #[serde(with = "millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Captures a response.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            body_bytes: body,
            duration,
        }
    }

    /// Status with its reason phrase, e.g. `404 Not Found`.
    #[must_use]
    pub fn status_line(&self) -> String {
        match reason_phrase(self.status) {
            Some(reason) => format!("{} {reason}", self.status),
            None => self.status.to_string(),
        }
    }

    /// Decodes the body.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body is not JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body_bytes)
    }

    /// Decoded body, or `None` when it is not JSON.
    #[must_use]
    pub fn body_as_json(&self) -> Option<serde_json::Value> {
        self.json().ok()
    }

    /// Header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    /// Elapsed time for humans: `124 ms` below a second, `1.50 s` above.
    #[must_use]
    pub fn duration_display(&self) -> String {
        match self.duration.as_millis() {
            ms @ 0..1000 => format!("{ms} ms"),
            _ => format!("{:.2} s", self.duration.as_secs_f64()),
        }
    }

    /// At most `max_chars` characters of the body, marked when cut.
    #[must_use]
    pub fn body_preview(&self, max_chars: usize) -> String {
        match self.body.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.body[..cut]),
            None => self.body.clone(),
        }
    }
}

/// Reason phrases for the statuses the placeholder API is known to return.
const fn reason_phrase(status: u16) -> Option<&'static str> {
    Some(match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => return None,
    })
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(status: u16, body: &[u8]) -> ResponseSpec {
        ResponseSpec::new(status, HashMap::new(), body.to_vec(), Duration::from_millis(100))
    }

    #[test]
    fn test_body_is_decoded() {
        let response = response(200, br#"{"id": 2, "title": "qui est esse"}"#);
        assert_eq!(response.body, r#"{"id": 2, "title": "qui est esse"}"#);
        assert_eq!(
            response.body_as_json(),
            Some(json!({"id": 2, "title": "qui est esse"}))
        );
    }

    #[test]
    fn test_empty_body_is_not_json() {
        assert!(response(204, b"").json().is_err());
    }

    #[test]
    fn test_status_line() {
        assert_eq!(response(201, b"").status_line(), "201 Created");
        assert_eq!(response(404, b"").status_line(), "404 Not Found");
        assert_eq!(response(418, b"").status_line(), "418");
    }

    #[test]
    fn test_duration_display() {
        let mut response = response(200, b"");
        assert_eq!(response.duration_display(), "100 ms");
        response.duration = Duration::from_millis(1500);
        assert_eq!(response.duration_display(), "1.50 s");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = ResponseSpec::new(
            200,
            HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            Vec::new(),
            Duration::ZERO,
        );
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_body_preview_cuts_on_char_boundary() {
        let response = response(200, "abcdéf".as_bytes());
        assert_eq!(response.body_preview(5), "abcdé...");
        assert_eq!(response.body_preview(10), "abcdéf");
    }

    #[test]
    fn test_duration_serializes_as_millis() {
        let value = serde_json::to_value(response(200, b"{}")).unwrap_or_default();
        assert_eq!(value["duration"], json!(100));
        assert!(value.get("body_bytes").is_none());
    }
}
