//! Static request payloads loaded from a fixture file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// An ordered list of free-form JSON records, indexed positionally.
///
/// No schema is enforced on the records; the suite only relies on them
/// being JSON objects with fields such as `userId`, `title` and `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FixturePayload {
    records: Vec<Value>,
}

impl FixturePayload {
    /// Wraps already-parsed records.
    #[must_use]
    pub const fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Parses fixture text, which must be a JSON array.
    ///
    /// # Errors
    ///
    /// Returns `MalformedFixture` if the text is not JSON or not an array.
    pub fn parse(text: &str) -> DomainResult<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(records)) => Ok(Self { records }),
            Ok(other) => Err(DomainError::MalformedFixture(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(DomainError::MalformedFixture(e.to_string())),
        }
    }

    /// Returns the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `FixtureIndexOutOfRange` past the end of the payload.
    pub fn get(&self, index: usize) -> DomainResult<&Value> {
        self.records
            .get(index)
            .ok_or(DomainError::FixtureIndexOutOfRange {
                index,
                len: self.records.len(),
            })
    }

    /// Returns all records.
    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
