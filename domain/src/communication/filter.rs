//! Filters over communication logs
//!
//! Filters arrive as tagged JSON, like the logs themselves, and are decoded
//! with the same fail-fast discipline: an unknown filter `type`, an unknown
//! communication tag inside `COMMUNICATION_TYPE_IN`, or a stray field is an
//! error, never a filter that silently matches everything.
//!
//! ```json
//! {"type": "CONJUNCTION", "subFilters": [
//!     {"type": "COMMUNICATION_TYPE_IN", "values": ["EWP_OUT"]},
//!     {"type": "EWP_OUT_TARGET_HEI_ID", "value": "uw.edu.pl"}
//! ]}
//! ```

use super::detail::CommunicationLogDetail;
use super::kind::CommunicationKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid filter: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum CommunicationLogFilter {
    /// All sub-filters must match (an empty conjunction matches everything)
    Conjunction { sub_filters: Vec<CommunicationLogFilter> },
    /// At least one sub-filter must match
    Disjunction { sub_filters: Vec<CommunicationLogFilter> },
    Negation { sub_filter: Box<CommunicationLogFilter> },
    CommunicationTypeIn { values: Vec<CommunicationKind> },
    /// Logs that ended at or before `value`; logs still open never match
    EndProcessingBeforeOrEqual { value: DateTime<Utc> },
    StartProcessingAfterOrEqual { value: DateTime<Utc> },
    /// Outbound EWP logs addressed to the given HEI
    EwpOutTargetHeiId { value: String },
    HostCodeEquals { value: String },
    HasException { value: bool },
    HttpStatusCodeLessThanOrEqual { value: u16 },
    HttpStatusCodeGreaterThanOrEqual { value: u16 },
}

impl Default for CommunicationLogFilter {
    fn default() -> Self {
        Self::match_all()
    }
}

impl CommunicationLogFilter {
    pub fn match_all() -> Self {
        CommunicationLogFilter::Conjunction {
            sub_filters: Vec::new(),
        }
    }

    pub fn and(filters: impl IntoIterator<Item = CommunicationLogFilter>) -> Self {
        CommunicationLogFilter::Conjunction {
            sub_filters: filters.into_iter().collect(),
        }
    }

    pub fn or(filters: impl IntoIterator<Item = CommunicationLogFilter>) -> Self {
        CommunicationLogFilter::Disjunction {
            sub_filters: filters.into_iter().collect(),
        }
    }

    pub fn negate(self) -> Self {
        CommunicationLogFilter::Negation {
            sub_filter: Box::new(self),
        }
    }

    pub fn of_kinds(kinds: impl IntoIterator<Item = CommunicationKind>) -> Self {
        CommunicationLogFilter::CommunicationTypeIn {
            values: kinds.into_iter().collect(),
        }
    }

    pub fn from_value(raw: Value) -> Result<Self, FilterError> {
        serde_json::from_value(raw).map_err(|e| FilterError::Invalid(e.to_string()))
    }

    pub fn parse(text: &str) -> Result<Self, FilterError> {
        serde_json::from_str(text).map_err(|e| FilterError::Invalid(e.to_string()))
    }

    pub fn matches(&self, detail: &CommunicationLogDetail) -> bool {
        let base = detail.base();
        match self {
            CommunicationLogFilter::Conjunction { sub_filters } => {
                sub_filters.iter().all(|f| f.matches(detail))
            }
            CommunicationLogFilter::Disjunction { sub_filters } => {
                sub_filters.iter().any(|f| f.matches(detail))
            }
            CommunicationLogFilter::Negation { sub_filter } => !sub_filter.matches(detail),
            CommunicationLogFilter::CommunicationTypeIn { values } => {
                values.contains(&detail.kind())
            }
            CommunicationLogFilter::EndProcessingBeforeOrEqual { value } => base
                .end_processing_date_time
                .is_some_and(|end| end <= *value),
            CommunicationLogFilter::StartProcessingAfterOrEqual { value } => {
                base.start_processing_date_time >= *value
            }
            CommunicationLogFilter::EwpOutTargetHeiId { value } => match detail {
                CommunicationLogDetail::EwpOut(out) => {
                    out.target_hei_id.as_deref() == Some(value.as_str())
                }
                _ => false,
            },
            CommunicationLogFilter::HostCodeEquals { value } => {
                detail.host_code() == Some(value.as_str())
            }
            CommunicationLogFilter::HasException { value } => base.has_exception() == *value,
            CommunicationLogFilter::HttpStatusCodeLessThanOrEqual { value } => detail
                .response()
                .is_some_and(|r| r.status_code <= *value),
            CommunicationLogFilter::HttpStatusCodeGreaterThanOrEqual { value } => detail
                .response()
                .is_some_and(|r| r.status_code >= *value),
        }
    }
}
