//! Summary projection of a communication log, for listings

use super::detail::CommunicationLogDetail;
use super::kind::CommunicationKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationLogSummary {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: CommunicationKind,
    pub start_processing_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_processing_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Request URL for HTTP logs, `ClassName#method` for plugin calls
    pub target: String,
    pub has_exception: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_communication_id: Option<i64>,
}

impl From<&CommunicationLogDetail> for CommunicationLogSummary {
    fn from(detail: &CommunicationLogDetail) -> Self {
        let base = detail.base();
        let target = match detail {
            CommunicationLogDetail::HostPluginFunctionCall(call) => call.target(),
            _ => detail
                .request()
                .map(|r| r.url.clone())
                .unwrap_or_default(),
        };
        Self {
            id: base.id,
            kind: detail.kind(),
            start_processing_date_time: base.start_processing_date_time,
            end_processing_date_time: base.end_processing_date_time,
            duration_ms: base.duration_ms(),
            status_code: detail.response().map(|r| r.status_code),
            target,
            has_exception: base.has_exception(),
            parent_communication_id: base.parent_communication_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::detail::HttpDirection;
    use crate::communication::fixtures;
    use serde_json::json;

    #[test]
    fn test_summary_of_plugin_call() {
        let summary = CommunicationLogSummary::from(&fixtures::plugin_call(1));
        assert_eq!(summary.kind, CommunicationKind::HostPluginFunctionCall);
        assert_eq!(summary.target, "pt.ulisboa.PluginApi#findCourses");
        assert_eq!(summary.status_code, None);
        assert_eq!(summary.duration_ms, Some(250));
    }

    #[test]
    fn test_summary_of_http_log() {
        let summary = CommunicationLogSummary::from(&fixtures::ewp_out(3));
        assert_eq!(summary.status_code, Some(503));
        assert_eq!(
            summary.target,
            "https://ewp.uw.edu.pl/institutions?hei_id=uw.edu.pl"
        );
        assert!(!summary.has_exception);
    }

    #[test]
    fn test_summary_serializes_type_tag() {
        let summary = CommunicationLogSummary::from(&fixtures::host_http(4, HttpDirection::In));
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["type"], json!("HOST_IN"));
        assert_eq!(value["statusCode"], json!(404));
        assert!(value.get("parentCommunicationId").is_none());
    }
}
