//! Processing parameters: batch decode and query control.
//!
//! [`DecodeParams`] drives [`DecodeBatchUseCase`](crate::use_cases::decode_batch::DecodeBatchUseCase),
//! [`QueryParams`] drives [`InspectLogsUseCase`](crate::use_cases::inspect_logs::InspectLogsUseCase).
//! These are application-layer concerns, not domain policy.

use commlog_domain::{DecodeOptions, UnknownFieldPolicy};
use serde::{Deserialize, Serialize};

/// Hard upper bound for a single inspection page.
pub const MAX_PAGE_LIMIT: usize = 50;

/// Batch decode parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeParams {
    /// Maximum number of records decoded at the same time.
    pub concurrency: usize,
    /// How decoding treats fields it does not know.
    pub unknown_fields: UnknownFieldPolicy,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            concurrency: 8,
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }
}

impl DecodeParams {
    // ==================== Builder Methods ====================

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    // ==================== Derived Values ====================

    /// Concurrency actually used; zero is treated as one.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::default().with_unknown_fields(self.unknown_fields)
    }
}

/// Inspection query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Page size used when the caller does not ask for one.
    pub default_limit: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self { default_limit: 20 }
    }
}

impl QueryParams {
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }
}
