use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// What a request carries after its headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum RequestBody {
    /// Nothing; used by GET and DELETE.
    #[default]
    Empty,
    /// Encoded JSON text.
    Json(String),
}

impl RequestBody {
    /// Encodes `value` as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if serialization fails.
    pub fn json(value: &Value) -> DomainResult<Self> {
        serde_json::to_string(value)
            .map(Self::Json)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// True for [`RequestBody::Empty`] and for blank JSON text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Json(text) => text.trim().is_empty(),
        }
    }

    /// Media type implied by the body, if any.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some("application/json"),
        }
    }

    /// The submitted document, decoded again.
    #[must_use]
    pub fn as_json(&self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::Json(text) => serde_json::from_str(text).ok(),
        }
    }
}
