//! JSONL reader for raw communication log records.

use async_trait::async_trait;
use commlog_application::{LogRecordSource, RawRecord, RecordSourceError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads one JSON value per line from a file.
///
/// Blank lines are skipped. Lines that are not JSON are kept as
/// [`RawRecord::Unparsable`] so the batch can report them.
pub struct JsonlRecordSource {
    path: PathBuf,
}

impl JsonlRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogRecordSource for JsonlRecordSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| RecordSourceError::Io {
                path: self.describe(),
                source,
            })?;
        let records = parse_lines(&content);
        debug!(path = %self.path.display(), records = records.len(), "Read JSONL records");
        Ok(records)
    }
}

/// Split JSONL text into raw records, numbering lines from 1.
pub fn parse_lines(content: &str) -> Vec<RawRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| match serde_json::from_str::<Value>(line) {
            Ok(value) => RawRecord::Json { line: i + 1, value },
            Err(e) => RawRecord::Unparsable {
                line: i + 1,
                error: e.to_string(),
            },
        })
        .collect()
}
