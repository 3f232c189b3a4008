//! Run Case Use Case
//!
//! Executes an [`ApiCase`]'s request and verifies its assertions against
//! the response. Transport faults are returned as errors rather than turned
//! into failed assertions, so the calling test aborts on them.

use std::sync::Arc;

use postprobe_domain::{ApiCase, CaseReport};

use crate::execute_request::{ExecuteRequest, ExecuteRequestError};
use crate::ports::{HttpClient, ResponseVerifier};

/// Use case for running one API case end to end.
pub struct RunCase<C: HttpClient, V: ResponseVerifier> {
    execute: ExecuteRequest<C>,
    verifier: V,
}

impl<C: HttpClient, V: ResponseVerifier> RunCase<C, V> {
    /// Creates the use case from an HTTP client and a verifier.
    pub const fn new(client: Arc<C>, verifier: V) -> Self {
        Self {
            execute: ExecuteRequest::new(client),
            verifier,
        }
    }

    /// Sends the case's request and evaluates its assertions.
    ///
    /// # Errors
    ///
    /// Returns `ExecuteRequestError` if the request is invalid or the call fails.
    pub async fn run(&self, case: &ApiCase) -> Result<CaseReport, ExecuteRequestError> {
        tracing::debug!(
            case = %case.name,
            method = %case.request.method,
            url = %case.request.url,
            "running case"
        );

        let response = self.execute.execute(&case.request).await.map_err(|e| {
            tracing::error!(case = %case.name, error = %e, "request failed");
            e
        })?;

        let results = self.verifier.verify(case, &response);

        for failure in results.failures() {
            tracing::warn!(
                case = %case.name,
                assertion = %failure.assertion.description(),
                actual = failure.actual.as_deref().unwrap_or("-"),
                error = failure.error.as_deref().unwrap_or("-"),
                "assertion failed"
            );
        }
        tracing::info!(
            case = %case.name,
            status = response.status,
            elapsed = %response.duration_display(),
            passed = results.passed,
            total = results.total,
            "case finished"
        );

        Ok(CaseReport::new(response, results))
    }
}
