//! Application error types

use postprobe_domain::DomainError;
use thiserror::Error;

use crate::execute_request::ExecuteRequestError;
use crate::ports::FixtureError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The request could not be executed.
    #[error("request failed: {0}")]
    Request(#[from] ExecuteRequestError),

    /// The fixture file could not be loaded.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
