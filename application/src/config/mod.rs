//! Application configuration
//!
//! Parameters the use cases run with. The CLI builds them from the loaded
//! file configuration.

pub mod processing_params;

pub use processing_params::{DecodeParams, MAX_PAGE_LIMIT, QueryParams};
