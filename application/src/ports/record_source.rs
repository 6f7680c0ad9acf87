//! Log record source port
//!
//! Defines where raw (still untyped) communication log records come from.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that prevent a source from producing records at all.
///
/// A single bad record is not a source error; it is yielded as
/// [`RawRecord::Unparsable`] and rejected by the decoder.
#[derive(Error, Debug)]
pub enum RecordSourceError {
    #[error("Failed to read records from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One raw record as read from a source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// Syntactically valid JSON, not yet checked against any shape
    Json { line: usize, value: Value },
    /// Input that is not JSON at all
    Unparsable { line: usize, error: String },
}

impl RawRecord {
    /// 1-based position of the record in its source.
    pub fn line(&self) -> usize {
        match self {
            RawRecord::Json { line, .. } | RawRecord::Unparsable { line, .. } => *line,
        }
    }
}

/// Source of raw communication log records.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LogRecordSource: Send + Sync {
    /// Human-readable description of the source (e.g. a file path).
    fn describe(&self) -> String;

    /// Read every record, in source order.
    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError>;
}

/// Source over records already held in memory.
pub struct InMemoryRecordSource {
    records: Vec<RawRecord>,
}

impl InMemoryRecordSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Wrap plain JSON values, numbering them from line 1.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| RawRecord::Json { line: i + 1, value })
            .collect();
        Self { records }
    }
}

#[async_trait]
impl LogRecordSource for InMemoryRecordSource {
    fn describe(&self) -> String {
        format!("<memory: {} records>", self.records.len())
    }

    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_in_memory_source_numbers_lines() {
        let source = InMemoryRecordSource::from_values(vec![json!({"a": 1}), json!({"b": 2})]);
        let records = source.read_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line(), 1);
        assert_eq!(records[1].line(), 2);
        assert_eq!(source.describe(), "<memory: 2 records>");
    }
}
