//! API cases: one request paired with the assertions its response must satisfy.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::request::{Header, HttpMethod, RequestBody, RequestSpec};
use crate::response::ResponseSpec;
use crate::testing::{Assertion, TestResults};

/// A single contract check against the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCase {
    /// Human-readable case name.
    pub name: String,
    /// The request to send.
    pub request: RequestSpec,
    /// Assertions evaluated against the response, in order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Whether to stop evaluating after the first failed assertion.
    #[serde(default)]
    pub stop_on_failure: bool,
}

impl ApiCase {
    /// Creates a case for `method` against `url` with no assertions.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request: RequestSpec::new(method, url),
            assertions: Vec::new(),
            stop_on_failure: false,
        }
    }

    /// GET case.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, url)
    }

    /// POST case.
    #[must_use]
    pub fn post(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, url)
    }

    /// PUT case.
    #[must_use]
    pub fn put(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Put, url)
    }

    /// PATCH case.
    #[must_use]
    pub fn patch(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Patch, url)
    }

    /// DELETE case.
    #[must_use]
    pub fn delete(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Delete, url)
    }

    /// Attaches a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded.
    pub fn with_json_body(mut self, body: &serde_json::Value) -> DomainResult<Self> {
        self.request.body = RequestBody::json(body)?;
        Ok(self)
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.request.headers.push(header);
        self
    }

    /// Adds an assertion (builder pattern).
    #[must_use]
    pub fn expect(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Adds several assertions (builder pattern).
    #[must_use]
    pub fn expect_all(mut self, assertions: impl IntoIterator<Item = Assertion>) -> Self {
        self.assertions.extend(assertions);
        self
    }

    /// Sets whether evaluation stops at the first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// The submitted JSON body, if any.
    #[must_use]
    pub fn submitted_json(&self) -> Option<serde_json::Value> {
        self.request.body.as_json()
    }
}

/// Outcome of running one [`ApiCase`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// The response the assertions were evaluated against.
    pub response: ResponseSpec,
    /// Per-assertion outcomes.
    pub results: TestResults,
}

impl CaseReport {
    /// Creates a report.
    #[must_use]
    pub const fn new(response: ResponseSpec, results: TestResults) -> Self {
        Self { response, results }
    }

    /// True when every evaluated assertion passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.results.all_passed()
    }

    /// Multi-line description of every failed assertion with the observed value.
    #[must_use]
    pub fn failure_summary(&self) -> String {
        let mut out = format!(
            "case '{}' failed {} of {} assertions (status {}, {}):",
            self.results.case_name,
            self.results.failed,
            self.results.total,
            self.response.status_line(),
            self.response.duration_display(),
        );
        for failure in self.results.failures() {
            let _ = write!(
                out,
                "\n  - {}: {}",
                failure.assertion.description(),
                failure.error.as_deref().unwrap_or("failed"),
            );
            if let Some(actual) = &failure.actual {
                let _ = write!(out, " (actual: {actual})");
            }
        }
        out
    }

    /// Panics with [`Self::failure_summary`] unless every assertion passed.
    ///
    /// # Panics
    ///
    /// When at least one assertion failed.
    #[track_caller]
    #[allow(clippy::panic)]
    pub fn assert_passed(&self) {
        if !self.passed() {
            panic!("{}", self.failure_summary());
        }
    }
}
