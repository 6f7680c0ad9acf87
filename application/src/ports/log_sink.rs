//! Port for writing decoded communication logs.
//!
//! Defines the [`DecodedLogSink`] trait that receives every record a batch
//! accepted, so that it can be persisted in canonical form (e.g. JSONL).
//!
//! This is separate from `tracing`-based operation logs: tracing reports what
//! the batch did, while this port carries the records themselves. A sink that
//! cannot store a record fails the batch.

use commlog_domain::{CodecError, CommunicationLogDetail};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Cannot encode communication log {id}: {source}")]
    Encoding { id: i64, source: CodecError },

    #[error("Cannot write to {target}: {source}")]
    Io {
        target: String,
        source: std::io::Error,
    },

    #[error("Sink {0} is unavailable")]
    Unavailable(String),
}

/// Port for writing accepted log details.
///
/// Methods are synchronous; buffering implementations may only report a
/// failed write when they are flushed.
pub trait DecodedLogSink: Send + Sync {
    /// Record one accepted detail.
    fn write(&self, detail: &CommunicationLogDetail) -> Result<(), SinkError>;

    /// Flush buffered output, if any.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// No-op implementation for tests and when no output is requested.
pub struct NoDecodedLogSink;

impl DecodedLogSink for NoDecodedLogSink {
    fn write(&self, _detail: &CommunicationLogDetail) -> Result<(), SinkError> {
        Ok(())
    }
}
