//! Response verifier port

use postprobe_domain::{ApiCase, TestResults, response::ResponseSpec};

/// Evaluates a case's assertions against the response it produced.
pub trait ResponseVerifier: Send + Sync {
    /// Runs every assertion of `case` (honoring `stop_on_failure`) against `response`.
    fn verify(&self, case: &ApiCase, response: &ResponseSpec) -> TestResults;
}
