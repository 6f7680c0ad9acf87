//! Infrastructure layer for ewp-commlog
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod repository;
pub mod source;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDecodeConfig, FileOutputConfig, FileQueryConfig,
    MAX_DECODE_CONCURRENCY,
};
pub use logging::JsonlDetailSink;
pub use repository::InMemoryCommunicationLogRepository;
pub use source::JsonlRecordSource;
