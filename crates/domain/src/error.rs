//! Errors raised while building cases or reading fixture data.

use thiserror::Error;

/// Failures in the pure model, before any I/O happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A JSON body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Fixture text is not a JSON array.
    #[error("malformed fixture: {0}")]
    MalformedFixture(String),

    /// A case asked for a fixture record that does not exist.
    #[error("fixture index {index} out of range (payload has {len} records)")]
    FixtureIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of records available.
        len: usize,
    },
}

/// Shorthand for results in this crate.
pub type DomainResult<T> = Result<T, DomainError>;
