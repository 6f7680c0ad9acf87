//! Application layer for ewp-commlog
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DecodeParams, MAX_PAGE_LIMIT, QueryParams};
pub use ports::{
    log_repository::{CommunicationLogRepository, RepositoryError},
    log_sink::{DecodedLogSink, NoDecodedLogSink, SinkError},
    progress::{DecodeProgressNotifier, NoDecodeProgress},
    record_source::{InMemoryRecordSource, LogRecordSource, RawRecord, RecordSourceError},
};
pub use use_cases::decode_batch::{
    DecodeBatchError, DecodeBatchUseCase, DecodeReport, RecordOutcome, decode_records,
};
pub use use_cases::inspect_logs::{
    InspectLogsError, InspectLogsInput, InspectLogsOutput, InspectLogsUseCase, LogDetailView,
};
