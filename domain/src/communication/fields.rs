//! Field-level access to flattened log records.
//!
//! Records are flat JSON objects, so each shape pulls its fields out one by one.
//! This keeps the offending field name available for [`CodecError::SchemaMismatch`]
//! and lets the reader report leftover (unknown) fields once the shape is done.

use super::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// How fields not declared by the target shape are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail with a schema mismatch naming the first unknown field (default)
    #[default]
    Reject,
    /// Drop unknown top-level fields silently
    Ignore,
}

pub(crate) struct FieldReader {
    fields: Map<String, Value>,
    policy: UnknownFieldPolicy,
}

impl FieldReader {
    pub(crate) fn new(fields: Map<String, Value>, policy: UnknownFieldPolicy) -> Self {
        Self { fields, policy }
    }

    /// Take a field that must be present and non-null.
    pub(crate) fn required<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, CodecError> {
        match self.fields.remove(name) {
            None | Some(Value::Null) => {
                Err(CodecError::schema_mismatch(name, "missing required field"))
            }
            Some(value) => Self::convert(name, value),
        }
    }

    /// Take a field that may be absent; `null` counts as absent.
    pub(crate) fn optional<T: DeserializeOwned>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>, CodecError> {
        match self.fields.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Self::convert(name, value).map(Some),
        }
    }

    /// Take an optional field verbatim, without any conversion.
    pub(crate) fn optional_raw(&mut self, name: &str) -> Option<Value> {
        match self.fields.remove(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Check what is left once the shape has taken all of its fields.
    pub(crate) fn finish(self) -> Result<(), CodecError> {
        if self.policy == UnknownFieldPolicy::Ignore {
            return Ok(());
        }
        match self.fields.keys().min() {
            Some(unknown) => Err(CodecError::schema_mismatch(
                unknown.as_str(),
                "unknown field",
            )),
            None => Ok(()),
        }
    }

    fn convert<T: DeserializeOwned>(name: &str, value: Value) -> Result<T, CodecError> {
        serde_json::from_value(value).map_err(|e| CodecError::schema_mismatch(name, e.to_string()))
    }
}

#[derive(Default)]
pub(crate) struct FieldWriter {
    fields: Map<String, Value>,
}

impl FieldWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), CodecError> {
        let value = serde_json::to_value(value)
            .map_err(|e| CodecError::Encoding(format!("{}: {}", name, e)))?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Absent optionals are omitted rather than written as `null`.
    pub(crate) fn put_opt<T: Serialize>(
        &mut self,
        name: &str,
        value: &Option<T>,
    ) -> Result<(), CodecError> {
        match value {
            Some(v) => self.put(name, v),
            None => Ok(()),
        }
    }

    pub(crate) fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}
