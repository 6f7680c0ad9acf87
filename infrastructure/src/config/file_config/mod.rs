//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod decode;
mod output;
mod query;

pub use decode::FileDecodeConfig;
pub use output::FileOutputConfig;
pub use query::FileQueryConfig;

use commlog_application::MAX_PAGE_LIMIT;
use commlog_domain::{ConfigIssue, MAX_OBSERVATIONS_LENGTH, Severity, TRUNCATION_SUFFIX};
use serde::{Deserialize, Serialize};

/// Upper bound for `decode.concurrency`.
pub const MAX_DECODE_CONCURRENCY: usize = 256;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Batch decode settings
    pub decode: FileDecodeConfig,
    /// Inspection settings
    pub query: FileQueryConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ConfigIssue::check_range(
                "decode.concurrency",
                to_i64(self.decode.concurrency),
                1,
                MAX_DECODE_CONCURRENCY as i64,
                Severity::Warning,
            ),
            ConfigIssue::check_range(
                "query.default_limit",
                to_i64(self.query.default_limit),
                1,
                MAX_PAGE_LIMIT as i64,
                Severity::Error,
            ),
            ConfigIssue::check_range(
                "query.observations_max_length",
                to_i64(self.query.observations_max_length),
                TRUNCATION_SUFFIX.len() as i64 + 1,
                MAX_OBSERVATIONS_LENGTH as i64,
                Severity::Warning,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
