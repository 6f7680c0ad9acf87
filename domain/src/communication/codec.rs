//! Dispatcher between raw tagged records and typed log details
//!
//! Decoding is all-or-nothing:
//!
//! 1. The input must be an object with a string `type` field
//!    ([`CodecError::MalformedEnvelope`] otherwise), checked before anything else.
//! 2. The tag is resolved through the [`VariantRegistry`]
//!    ([`CodecError::UnknownVariant`] otherwise).
//! 3. The remaining fields are taken one by one into the target shape
//!    ([`CodecError::SchemaMismatch`] names the first offending field).
//!
//! Encoding writes the tag derived from the value itself, followed by the
//! base and shape fields. Absent optional fields are omitted.

use super::detail::CommunicationLogDetail;
use super::error::CodecError;
use super::fields::{FieldReader, FieldWriter, UnknownFieldPolicy};
use super::registry::VariantRegistry;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Name of the discriminator field.
pub const TYPE_FIELD: &str = "type";

/// Options controlling how strictly raw records are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub unknown_fields: UnknownFieldPolicy,
}

impl DecodeOptions {
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }
}

/// Stateless codec bound to the standard registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunicationLogCodec {
    options: DecodeOptions,
}

impl CommunicationLogCodec {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn decode(&self, raw: &Value) -> Result<CommunicationLogDetail, CodecError> {
        self.decode_owned(raw.clone())
    }

    pub fn decode_owned(&self, raw: Value) -> Result<CommunicationLogDetail, CodecError> {
        let Value::Object(mut fields) = raw else {
            return Err(CodecError::MalformedEnvelope(format!(
                "expected a JSON object, found {}",
                json_type_name(&raw)
            )));
        };

        let tag = match fields.remove(TYPE_FIELD) {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(CodecError::MalformedEnvelope(format!(
                    "'{}' must be a string, found {}",
                    TYPE_FIELD,
                    json_type_name(&other)
                )));
            }
            None => {
                return Err(CodecError::MalformedEnvelope(format!(
                    "missing '{}' field",
                    TYPE_FIELD
                )));
            }
        };

        let entry = VariantRegistry::standard().lookup(&tag)?;
        let mut reader = FieldReader::new(fields, self.options.unknown_fields);
        let detail = CommunicationLogDetail::read(entry.kind, entry.shape, &mut reader)?;
        reader.finish()?;
        Ok(detail)
    }

    pub fn encode(&self, detail: &CommunicationLogDetail) -> Result<Value, CodecError> {
        let mut writer = FieldWriter::new();
        detail.write(&mut writer)?;
        Ok(Value::Object(writer.into_map()))
    }
}

/// Decode with default options (unknown fields rejected).
pub fn decode(raw: &Value) -> Result<CommunicationLogDetail, CodecError> {
    CommunicationLogCodec::default().decode(raw)
}

pub fn encode(detail: &CommunicationLogDetail) -> Result<Value, CodecError> {
    CommunicationLogCodec::default().encode(detail)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for CommunicationLogDetail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CommunicationLogDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        CommunicationLogCodec::default()
            .decode_owned(raw)
            .map_err(serde::de::Error::custom)
    }
}
