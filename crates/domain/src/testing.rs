//! Declarative checks on a response and their outcomes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One predicate over a [`crate::response::ResponseSpec`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// The status is accepted by `expected`.
    StatusCode {
        /// Accepted statuses.
        expected: StatusExpectation,
    },
    /// The response arrived in under `max_ms`.
    ResponseTime {
        /// Exclusive upper bound in milliseconds.
        max_ms: u64,
    },
    /// A header is present and non-empty, and equals `value` when given.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value.
        value: Option<String>,
    },
    /// The body parses as JSON.
    IsJson,
    /// Something exists at `path`, and equals `expected` when given.
    JsonPath {
        /// `$`, `$.title`, `$.a.b` or `$[1].id`.
        path: String,
        /// Required value.
        expected: Option<serde_json::Value>,
    },
    /// Nothing exists at `path`.
    JsonPathAbsent {
        /// Path into the body.
        path: String,
    },
    /// The value at `path` is not null, false, zero or empty.
    JsonPathTruthy {
        /// Path into the body.
        path: String,
    },
    /// The decoded body equals `expected`.
    JsonEquals {
        /// Expected document.
        expected: serde_json::Value,
    },
}

impl Assertion {
    /// Status must equal `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode {
            expected: StatusExpectation::Exact(code),
        }
    }

    /// Status must be one of `codes`.
    #[must_use]
    pub fn status_in(codes: &[u16]) -> Self {
        Self::StatusCode {
            expected: StatusExpectation::OneOf(codes.to_vec()),
        }
    }

    /// Elapsed time must be strictly below `limit`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn faster_than(limit: Duration) -> Self {
        Self::ResponseTime {
            max_ms: limit.as_millis() as u64,
        }
    }

    /// Header must be present and non-empty.
    #[must_use]
    pub fn header_present(name: impl Into<String>) -> Self {
        Self::HeaderExists {
            name: name.into(),
            value: None,
        }
    }

    /// Top-level JSON field must exist.
    #[must_use]
    pub fn has_field(field: &str) -> Self {
        Self::JsonPath {
            path: field_path(field),
            expected: None,
        }
    }

    /// Top-level JSON field must equal `value`.
    #[must_use]
    pub fn field_equals(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self::JsonPath {
            path: field_path(field),
            expected: Some(value.into()),
        }
    }

    /// Top-level JSON field must be absent.
    #[must_use]
    pub fn lacks_field(field: &str) -> Self {
        Self::JsonPathAbsent {
            path: field_path(field),
        }
    }

    /// Top-level JSON field must be truthy.
    #[must_use]
    pub fn field_truthy(field: &str) -> Self {
        Self::JsonPathTruthy {
            path: field_path(field),
        }
    }

    /// Body must parse to an empty JSON object.
    #[must_use]
    pub fn empty_json_object() -> Self {
        Self::JsonEquals {
            expected: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Round-trip checks: each of `fields` must come back with the value found
    /// in `submitted`. A field missing from `submitted` is only checked for presence.
    #[must_use]
    pub fn echoes(submitted: &serde_json::Value, fields: &[&str]) -> Vec<Self> {
        fields
            .iter()
            .map(|field| Self::JsonPath {
                path: field_path(field),
                expected: submitted.get(*field).cloned(),
            })
            .collect()
    }

    /// One-line description used in reports.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::ResponseTime { max_ms } => format!("Response time < {max_ms}ms"),
            Self::HeaderExists {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::HeaderExists { name, value: None } => format!("Header '{name}' is present"),
            Self::IsJson => "Body is valid JSON".to_string(),
            Self::JsonPath {
                path,
                expected: Some(v),
            } => format!("JSON {path} equals {v}"),
            Self::JsonPath {
                path,
                expected: None,
            } => format!("JSON {path} exists"),
            Self::JsonPathAbsent { path } => format!("JSON {path} is absent"),
            Self::JsonPathTruthy { path } => format!("JSON {path} is truthy"),
            Self::JsonEquals { expected } => format!("Body equals {expected}"),
        }
    }
}

/// Builds the JSONPath for a top-level field.
fn field_path(field: &str) -> String {
    format!("$.{field}")
}

/// Which statuses a [`Assertion::StatusCode`] accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exactly this status.
    Exact(u16),
    /// Any status in `min..=max`.
    Range {
        /// Lowest accepted status.
        min: u16,
        /// Highest accepted status.
        max: u16,
    },
    /// Any of these statuses.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Whether `status` is accepted.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(code) => *code == status,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Short form used in messages: `= 200`, `in 200-299`, `in [200, 204]`.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let listed = codes
                    .iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("in [{listed}]")
            }
        }
    }
}

/// Outcome of one assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion evaluated.
    pub assertion: Assertion,
    /// Whether it held.
    pub passed: bool,
    /// What the response actually showed, when there was something to show.
    pub actual: Option<String>,
    /// Why it failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// The assertion held; `actual` is what was observed.
    #[must_use]
    pub const fn pass(assertion: Assertion, actual: Option<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual,
            error: None,
        }
    }

    /// The assertion did not hold.
    #[must_use]
    pub fn fail(assertion: Assertion, actual: Option<String>, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual,
            error: Some(error.into()),
        }
    }
}

/// Every assertion outcome for one case, with counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Name of the case.
    pub case_name: String,
    /// Outcomes in evaluation order.
    pub results: Vec<AssertionResult>,
    /// Assertions evaluated.
    pub total: usize,
    /// Assertions that held.
    pub passed: usize,
    /// Assertions that did not.
    pub failed: usize,
    /// Time spent evaluating, in milliseconds.
    pub duration_ms: u64,
}

impl TestResults {
    /// Tallies `results`.
    #[must_use]
    pub fn new(case_name: impl Into<String>, results: Vec<AssertionResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            case_name: case_name.into(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
            duration_ms,
        }
    }

    /// True when nothing failed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// The failed outcomes, in order.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_expectations() {
        assert!(StatusExpectation::Exact(201).matches(201));
        assert!(!StatusExpectation::Exact(201).matches(200));

        let range = StatusExpectation::Range { min: 200, max: 299 };
        assert!(range.matches(299));
        assert!(!range.matches(300));
        assert_eq!(range.description(), "in 200-299");

        let delete_ok = StatusExpectation::OneOf(vec![200, 202, 204]);
        assert!([200, 202, 204].iter().all(|s| delete_ok.matches(*s)));
        assert!(!delete_ok.matches(201));
    }

    #[test]
    fn test_assertion_description() {
        assert_eq!(Assertion::status(200).description(), "Status code = 200");
        assert_eq!(
            Assertion::status_in(&[200, 202, 204]).description(),
            "Status code in [200, 202, 204]"
        );
        assert_eq!(
            Assertion::field_equals("title", "qui est esse").description(),
            r#"JSON $.title equals "qui est esse""#
        );
        assert_eq!(
            Assertion::faster_than(Duration::from_millis(700)).description(),
            "Response time < 700ms"
        );
        assert_eq!(Assertion::lacks_field("error").description(), "JSON $.error is absent");
    }

    #[test]
    fn test_echoes_builds_round_trip_checks() {
        let submitted = json!({"userId": 1, "title": "t", "body": "b"});
        let assertions = Assertion::echoes(&submitted, &["title", "body", "missing"]);

        assert_eq!(
            assertions,
            vec![
                Assertion::field_equals("title", "t"),
                Assertion::field_equals("body", "b"),
                Assertion::has_field("missing"),
            ]
        );
    }

    #[test]
    fn test_assertion_serde_tag() {
        let value = serde_json::to_value(Assertion::empty_json_object()).unwrap_or_default();
        assert_eq!(value, json!({"type": "json_equals", "expected": {}}));
    }

    #[test]
    fn test_test_results() {
        let results = vec![
            AssertionResult::pass(Assertion::status(200), Some("200".to_string())),
            AssertionResult::fail(Assertion::IsJson, None, "Invalid JSON"),
        ];

        let test_results = TestResults::new("get post", results, 3);
        assert_eq!(test_results.total, 2);
        assert_eq!(test_results.passed, 1);
        assert_eq!(test_results.failed, 1);
        assert!(!test_results.all_passed());
        assert_eq!(test_results.failures().count(), 1);
    }
}
