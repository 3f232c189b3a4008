//! Evaluates a case's assertions against the response it produced.

use std::time::{Duration, Instant};

use postprobe_application::ports::ResponseVerifier;
use postprobe_domain::response::ResponseSpec;
use postprobe_domain::{ApiCase, Assertion, AssertionResult, StatusExpectation, TestResults};
use serde_json::Value;

/// Longest body excerpt quoted in a failure.
const PREVIEW_CHARS: usize = 100;

/// Evaluates assertions in order and collects every outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner {
    stop_on_failure: bool,
}

impl TestRunner {
    /// A runner that reports every failure.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Stop at the first failed assertion of every case.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Evaluates `case`'s assertions against `response`.
    #[must_use]
    pub fn run(&self, case: &ApiCase, response: &ResponseSpec) -> TestResults {
        let stop_early = self.stop_on_failure || case.stop_on_failure;
        let started = Instant::now();
        let mut results = Vec::with_capacity(case.assertions.len());

        for assertion in &case.assertions {
            let result = Self::run_assertion(assertion, response);
            let keep_going = result.passed || !stop_early;
            results.push(result);
            if !keep_going {
                break;
            }
        }

        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        TestResults::new(&case.name, results, elapsed)
    }

    /// Evaluates one assertion.
    #[must_use]
    pub fn run_assertion(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match evaluate(assertion, response) {
            Ok(actual) => AssertionResult::pass(assertion.clone(), actual),
            Err(Failure { actual, reason }) => {
                AssertionResult::fail(assertion.clone(), actual, reason)
            }
        }
    }
}

impl ResponseVerifier for TestRunner {
    fn verify(&self, case: &ApiCase, response: &ResponseSpec) -> TestResults {
        self.run(case, response)
    }
}

/// Why an assertion did not hold, and what was seen instead.
struct Failure {
    actual: Option<String>,
    reason: String,
}

impl Failure {
    fn saw(actual: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            reason: reason.into(),
        }
    }

    fn blind(reason: impl Into<String>) -> Self {
        Self {
            actual: None,
            reason: reason.into(),
        }
    }
}

/// `Ok` carries the observed value worth reporting, if any.
type Verdict = Result<Option<String>, Failure>;

fn evaluate(assertion: &Assertion, response: &ResponseSpec) -> Verdict {
    match assertion {
        Assertion::StatusCode { expected } => status(response.status, expected),
        Assertion::ResponseTime { max_ms } => latency(response.duration, *max_ms),
        Assertion::HeaderExists { name, value } => header(response, name, value.as_deref()),
        Assertion::IsJson => decode(response).map(|_| None),
        Assertion::JsonPath { path, expected } => match (lookup(response, path)?, expected) {
            (None, _) => Err(Failure::saw(
                response.body_preview(PREVIEW_CHARS),
                format!("JSON path '{path}' not found"),
            )),
            (Some(found), Some(wanted)) if &found != wanted => Err(Failure::saw(
                found.to_string(),
                format!("JSON path '{path}' value mismatch: expected {wanted}, got {found}"),
            )),
            (Some(found), _) => Ok(Some(found.to_string())),
        },
        Assertion::JsonPathAbsent { path } => match lookup(response, path)? {
            None => Ok(None),
            Some(found) => Err(Failure::saw(
                found.to_string(),
                format!("Response contains {path}: {found}"),
            )),
        },
        Assertion::JsonPathTruthy { path } => match lookup(response, path)? {
            Some(found) if is_truthy(&found) => Ok(Some(found.to_string())),
            Some(found) => Err(Failure::saw(
                found.to_string(),
                format!("JSON path '{path}' is empty or false"),
            )),
            None => Err(Failure::blind(format!("JSON path '{path}' not found"))),
        },
        Assertion::JsonEquals { expected } => {
            let body = decode(response)?;
            if &body == expected {
                Ok(Some(body.to_string()))
            } else {
                Err(Failure::saw(
                    body.to_string(),
                    format!("Response body is not {expected}: {body}"),
                ))
            }
        }
    }
}

fn status(actual: u16, expected: &StatusExpectation) -> Verdict {
    if expected.matches(actual) {
        Ok(Some(actual.to_string()))
    } else {
        Err(Failure::saw(
            actual.to_string(),
            format!("Unexpected status code: {actual} (expected {})", expected.description()),
        ))
    }
}

fn latency(elapsed: Duration, max_ms: u64) -> Verdict {
    let shown = format!("{}ms", elapsed.as_millis());
    if elapsed < Duration::from_millis(max_ms) {
        Ok(Some(shown))
    } else {
        let reason = format!("Response took {shown}, expected < {max_ms}ms");
        Err(Failure::saw(shown, reason))
    }
}

fn header(response: &ResponseSpec, name: &str, wanted: Option<&str>) -> Verdict {
    let Some(found) = response.header(name) else {
        return Err(Failure::blind(format!("Header '{name}' not found")));
    };
    match wanted {
        _ if found.trim().is_empty() => Err(Failure::saw(found, format!("Header '{name}' is empty"))),
        Some(wanted) if found != wanted => Err(Failure::saw(
            found,
            format!("Header '{name}' value mismatch: expected '{wanted}', got '{found}'"),
        )),
        _ => Ok(Some(found.to_string())),
    }
}

fn decode(response: &ResponseSpec) -> Result<Value, Failure> {
    response.json().map_err(|e| {
        Failure::saw(
            response.body_preview(PREVIEW_CHARS),
            format!("Body is not valid JSON: {e}"),
        )
    })
}

/// Decodes the body and resolves `path` in it.
fn lookup(response: &ResponseSpec, path: &str) -> Result<Option<Value>, Failure> {
    let steps = parse_path(path)
        .map_err(|e| Failure::blind(format!("Invalid JSON path '{path}': {e}")))?;
    let body = decode(response)?;
    Ok(walk(&body, &steps).cloned())
}

/// Null, false, zero and empty values are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Step<'p> {
    Key(&'p str),
    Index(usize),
}

/// Parses `$`, `$.key`, `$.a.b`, `$[0]` and mixes such as `$.items[1].id`.
fn parse_path(path: &str) -> Result<Vec<Step<'_>>, String> {
    let mut rest = path
        .trim()
        .strip_prefix('$')
        .ok_or_else(|| "must start with '$'".to_string())?;
    let mut steps = Vec::new();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            if end == 0 {
                return Err("empty key".to_string());
            }
            steps.push(Step::Key(&after[..end]));
            rest = &after[end..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let (index, tail) = after
                .split_once(']')
                .ok_or_else(|| "unclosed '['".to_string())?;
            let index = index
                .trim()
                .parse()
                .map_err(|_| format!("bad array index '{index}'"))?;
            steps.push(Step::Index(index));
            rest = tail;
        } else {
            return Err(format!("unexpected '{rest}'"));
        }
    }

    Ok(steps)
}

fn walk<'v>(root: &'v Value, steps: &[Step<'_>]) -> Option<&'v Value> {
    steps.iter().try_fold(root, |node, step| match step {
        Step::Key(key) => node.get(*key),
        Step::Index(index) => node.get(*index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            HashMap::from([(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )]),
            body.as_bytes().to_vec(),
            Duration::from_millis(50),
        )
    }

    fn check(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        TestRunner::run_assertion(assertion, response)
    }

    #[test]
    fn test_status_failure_names_both_sides() {
        let created = response(201, "{}");
        assert!(check(&Assertion::status(201), &created).passed);

        let result = check(&Assertion::status(200), &created);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("201"));
        assert_eq!(
            result.error.as_deref(),
            Some("Unexpected status code: 201 (expected = 200)")
        );
    }

    #[test]
    fn test_delete_statuses() {
        let accepted = Assertion::status_in(&[200, 202, 204]);
        for status in [200, 202, 204] {
            assert!(check(&accepted, &response(status, "")).passed);
        }
        assert!(!check(&accepted, &response(201, "")).passed);
    }

    #[test]
    fn test_latency_bound_is_exclusive() {
        let answered = response(200, "{}");
        assert!(check(&Assertion::ResponseTime { max_ms: 51 }, &answered).passed);

        let result = check(&Assertion::ResponseTime { max_ms: 50 }, &answered);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("50ms"));
        assert_eq!(result.error.as_deref(), Some("Response took 50ms, expected < 50ms"));
    }

    #[test]
    fn test_header_checks() {
        let mut headed = response(200, "{}");
        headed.headers.insert("X-Blank".to_string(), " ".to_string());

        assert!(check(&Assertion::header_present("content-type"), &headed).passed);
        assert!(!check(&Assertion::header_present("X-Blank"), &headed).passed);

        let missing = check(&Assertion::header_present("X-Missing"), &headed);
        assert_eq!(missing.error.as_deref(), Some("Header 'X-Missing' not found"));
        assert_eq!(missing.actual, None);

        let pinned = Assertion::HeaderExists {
            name: "Content-Type".to_string(),
            value: Some("text/html".to_string()),
        };
        assert!(!check(&pinned, &headed).passed);
    }

    #[test]
    fn test_non_json_body_fails_every_json_check() {
        let html = response(200, "<html></html>");
        for assertion in [
            Assertion::IsJson,
            Assertion::has_field("title"),
            Assertion::lacks_field("error"),
            Assertion::empty_json_object(),
        ] {
            let result = check(&assertion, &html);
            assert!(!result.passed, "{}", assertion.description());
            assert_eq!(result.actual.as_deref(), Some("<html></html>"));
            assert!(
                result
                    .error
                    .as_deref()
                    .is_some_and(|e| e.starts_with("Body is not valid JSON"))
            );
        }
    }

    #[test]
    fn test_field_checks() {
        let post = response(200, r#"{"id": 2, "title": "qui est esse"}"#);

        assert!(check(&Assertion::field_equals("title", "qui est esse"), &post).passed);
        assert_eq!(check(&Assertion::has_field("id"), &post).actual.as_deref(), Some("2"));
        assert!(!check(&Assertion::has_field("body"), &post).passed);

        let result = check(&Assertion::field_equals("id", 1), &post);
        assert_eq!(
            result.error.as_deref(),
            Some("JSON path '$.id' value mismatch: expected 1, got 2")
        );
    }

    #[test]
    fn test_absent_field_reports_what_was_there() {
        assert!(check(&Assertion::lacks_field("error"), &response(200, r#"{"id": 1}"#)).passed);

        let result = check(&Assertion::lacks_field("error"), &response(500, r#"{"error": "boom"}"#));
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some(r#"Response contains $.error: "boom""#));
    }

    #[test]
    fn test_truthiness() {
        let post = response(200, r#"{"body": "text", "empty": "", "zero": 0, "list": [1]}"#);
        assert!(check(&Assertion::field_truthy("body"), &post).passed);
        assert!(check(&Assertion::field_truthy("list"), &post).passed);
        assert!(!check(&Assertion::field_truthy("empty"), &post).passed);
        assert!(!check(&Assertion::field_truthy("zero"), &post).passed);
        assert!(!check(&Assertion::field_truthy("missing"), &post).passed);
    }

    #[test]
    fn test_empty_object_body() {
        assert!(check(&Assertion::empty_json_object(), &response(200, "{}")).passed);

        let result = check(&Assertion::empty_json_object(), &response(200, r#"{"id": 3}"#));
        assert_eq!(result.actual.as_deref(), Some(r#"{"id":3}"#));
    }

    #[test]
    fn test_paths_into_comment_lists() {
        let comments = response(200, r#"[{"postId": 1, "id": 1}, {"postId": 1, "id": 2}]"#);
        let second = Assertion::JsonPath {
            path: "$[1].id".to_string(),
            expected: Some(json!(2)),
        };
        assert!(check(&second, &comments).passed);

        let past_end = Assertion::JsonPath {
            path: "$[5]".to_string(),
            expected: None,
        };
        assert!(!check(&past_end, &comments).passed);
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path("$"), Ok(vec![]));
        assert_eq!(
            parse_path("$.items[1].id"),
            Ok(vec![Step::Key("items"), Step::Index(1), Step::Key("id")])
        );
        assert_eq!(parse_path("title"), Err("must start with '$'".to_string()));
        assert_eq!(parse_path("$..a"), Err("empty key".to_string()));
        assert_eq!(parse_path("$[x]"), Err("bad array index 'x'".to_string()));
        assert_eq!(parse_path("$[1"), Err("unclosed '['".to_string()));
    }

    #[test]
    fn test_bad_path_is_a_failure_not_a_panic() {
        let result = check(
            &Assertion::JsonPathAbsent {
                path: "error".to_string(),
            },
            &response(200, "{}"),
        );
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid JSON path 'error': must start with '$'")
        );
    }

    #[test]
    fn test_round_trip_case() {
        let created = response(201, r#"{"title": "foo", "body": "bar", "userId": 1, "id": 101}"#);
        let submitted = json!({"title": "foo", "body": "bar", "userId": 1});
        let case = ApiCase::post("create", "https://example.com/posts")
            .expect(Assertion::status(201))
            .expect(Assertion::IsJson)
            .expect_all(Assertion::echoes(&submitted, &["title", "body", "userId"]));

        let results = TestRunner::new().run(&case, &created);
        assert!(results.all_passed());
        assert_eq!(results.total, 5);
    }

    #[test]
    fn test_stop_on_failure() {
        let missing = response(404, "{}");
        let case = ApiCase::get("missing", "https://example.com/posts/0")
            .expect(Assertion::status(200))
            .expect(Assertion::has_field("title"));

        assert_eq!(TestRunner::new().verify(&case, &missing).failed, 2);

        let stopped = TestRunner::new().with_stop_on_failure(true).run(&case, &missing);
        assert_eq!(stopped.results.len(), 1);

        let per_case = TestRunner::new().run(&case.clone().with_stop_on_failure(true), &missing);
        assert_eq!(per_case.results.len(), 1);
    }
}
