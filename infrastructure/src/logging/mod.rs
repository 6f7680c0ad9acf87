//! Logging infrastructure: canonical JSONL output of decoded logs.
//!
//! Provides [`JsonlDetailSink`], a JSONL file writer that implements
//! the [`DecodedLogSink`](commlog_application::DecodedLogSink) port.

mod jsonl_sink;

pub use jsonl_sink::JsonlDetailSink;
