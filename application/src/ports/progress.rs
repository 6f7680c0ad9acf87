//! Progress notification port
//!
//! Defines the interface for reporting progress during a batch decode.

use commlog_domain::CodecError;

/// Callback for progress updates during a batch decode
///
/// Implementations live in the presentation layer. Record callbacks arrive in
/// completion order, which is not the input order when decoding concurrently.
pub trait DecodeProgressNotifier: Send + Sync {
    /// Called once the source has been read
    fn on_batch_start(&self, total_records: usize);

    /// Called when a record has been accepted
    fn on_record_accepted(&self, _line: usize) {}

    /// Called when a record has been rejected
    fn on_record_rejected(&self, _line: usize, _error: &CodecError) {}

    /// Called when every record has been handled
    fn on_batch_complete(&self, accepted: usize, rejected: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoDecodeProgress;

impl DecodeProgressNotifier for NoDecodeProgress {
    fn on_batch_start(&self, _total_records: usize) {}
    fn on_batch_complete(&self, _accepted: usize, _rejected: usize) {}
}
