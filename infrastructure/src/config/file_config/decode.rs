//! Decode configuration from TOML (`[decode]` section)

use commlog_application::DecodeParams;
use commlog_domain::UnknownFieldPolicy;
use serde::{Deserialize, Serialize};

/// Raw decode configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDecodeConfig {
    /// `"reject"` (default) or `"ignore"`
    pub unknown_fields: UnknownFieldPolicy,
    /// Maximum number of records decoded at the same time
    pub concurrency: usize,
}

impl Default for FileDecodeConfig {
    fn default() -> Self {
        let params = DecodeParams::default();
        Self {
            unknown_fields: params.unknown_fields,
            concurrency: params.concurrency,
        }
    }
}

impl FileDecodeConfig {
    pub fn to_params(&self) -> DecodeParams {
        DecodeParams::default()
            .with_unknown_fields(self.unknown_fields)
            .with_concurrency(self.concurrency)
    }
}
