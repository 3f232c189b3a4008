//! File-backed fixture source.

use std::path::Path;

use postprobe_application::ports::{FixtureError, FixtureSource};
use postprobe_domain::FixturePayload;
use tokio::fs;

/// Reads fixture payloads from JSON files using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFixtureSource;

impl FileFixtureSource {
    /// Creates a new `FileFixtureSource`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FixtureSource for FileFixtureSource {
    async fn load(&self, path: &Path) -> Result<FixturePayload, FixtureError> {
        let text = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FixtureError::NotFound(path.to_path_buf())
            } else {
                FixtureError::Io(e)
            }
        })?;

        let payload = FixturePayload::parse(&text).map_err(|source| FixtureError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), records = payload.len(), "fixture loaded");

        Ok(payload)
    }
}
