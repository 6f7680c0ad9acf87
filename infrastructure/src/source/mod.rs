//! Record sources: where raw communication log records are read from.

mod jsonl_source;

pub use jsonl_source::{JsonlRecordSource, parse_lines};
