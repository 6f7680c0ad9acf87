//! Use cases (application services)

pub mod decode_batch;
pub mod inspect_logs;
