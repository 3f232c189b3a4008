use std::fmt;

use serde::{Deserialize, Serialize};

/// The verbs the suite sends to `/posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read a post or its comments.
    Get,
    /// Create a post.
    Post,
    /// Replace a post.
    Put,
    /// Update some fields of a post.
    Patch,
    /// Remove a post.
    Delete,
}

impl HttpMethod {
    /// True for the verbs whose cases submit a JSON document.
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Wire name of the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
