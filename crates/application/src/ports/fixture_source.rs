//! Fixture source port.

use std::future::Future;
use std::path::{Path, PathBuf};

use postprobe_domain::{DomainError, FixturePayload};
use thiserror::Error;

/// Error type for fixture loading.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file not found.
    #[error("fixture file not found: {0}")]
    NotFound(PathBuf),

    /// The fixture file could not be parsed.
    #[error("fixture file {path} is malformed: {source}")]
    Malformed {
        /// File that failed to parse.
        path: PathBuf,
        /// Parse failure.
        source: DomainError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of fixture payloads.
///
/// Every call reads the payload afresh; callers never share a loaded copy.
pub trait FixtureSource: Send + Sync {
    /// Loads the fixture payload stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not a JSON array.
    fn load(&self, path: &Path) -> impl Future<Output = Result<FixturePayload, FixtureError>> + Send;
}
