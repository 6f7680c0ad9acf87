//! Port definitions (interfaces for external adapters)

pub mod log_repository;
pub mod log_sink;
pub mod progress;
pub mod record_source;
