//! Query configuration from TOML (`[query]` section)

use commlog_application::QueryParams;
use commlog_domain::MAX_OBSERVATIONS_LENGTH;
use serde::{Deserialize, Serialize};

/// Raw query configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    /// Page size when `--limit` is not given
    pub default_limit: usize,
    /// Observations longer than this are cut when a log is displayed
    pub observations_max_length: usize,
}

impl Default for FileQueryConfig {
    fn default() -> Self {
        Self {
            default_limit: QueryParams::default().default_limit,
            observations_max_length: MAX_OBSERVATIONS_LENGTH,
        }
    }
}

impl FileQueryConfig {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::default().with_default_limit(self.default_limit)
    }
}
