//! Codec error types

use thiserror::Error;

/// Failure to map a raw record to (or from) a typed communication log.
///
/// Every variant describes a rejection of a single record; none of them is
/// fatal to the caller's batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unknown communication log type: {0}")]
    UnknownVariant(String),

    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Schema mismatch on field '{field}': {reason}")]
    SchemaMismatch { field: String, reason: String },

    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl CodecError {
    pub fn schema_mismatch(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short, stable category name used for grouping rejections in reports.
    pub fn category(&self) -> &'static str {
        match self {
            CodecError::UnknownVariant(_) => "unknown_variant",
            CodecError::MalformedEnvelope(_) => "malformed_envelope",
            CodecError::SchemaMismatch { .. } => "schema_mismatch",
            CodecError::Encoding(_) => "encoding",
        }
    }

    /// The offending field, for schema mismatches.
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::SchemaMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}
