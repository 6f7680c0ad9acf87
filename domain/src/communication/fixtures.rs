//! Shared sample records for the communication tests.

use super::base::CommunicationLogBase;
use super::detail::{
    CommunicationLogDetail, EwpHttpCommunicationLogDetail, HostHttpCommunicationLogDetail,
    HostPluginFunctionCallLogDetail, HttpCommunicationFromEwpNodeLogDetail, HttpDirection,
};
use super::http::{EwpAuthenticationMethod, HttpRequestLog, HttpResponseLog};
use super::kind::CommunicationKind;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

pub(crate) fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap()
}

pub(crate) fn base(id: i64) -> CommunicationLogBase {
    let start = at(id as u32 % 60);
    CommunicationLogBase::new(id, start).with_end(start + chrono::Duration::milliseconds(250))
}

pub(crate) fn plugin_call(id: i64) -> CommunicationLogDetail {
    HostPluginFunctionCallLogDetail::new(
        base(id),
        "ulisboa",
        "ulisboa-plugin",
        "pt.ulisboa.PluginApi",
        "findCourses",
    )
    .with_argument("pt.ulisboa")
    .with_result(json!({"courses": 3}))
    .into()
}

pub(crate) fn ewp_in(id: i64) -> CommunicationLogDetail {
    HttpCommunicationFromEwpNodeLogDetail::new(
        base(id),
        EwpAuthenticationMethod::HttpSignature,
        HttpRequestLog::new("POST", "https://node.ulisboa.pt/api/ewp/iias/get")
            .with_header("Digest", "SHA-256=abc"),
    )
    .with_response(HttpResponseLog::new(200).with_body("<iias-get-response/>"))
    .with_covered_hei_id("uw.edu.pl")
    .into()
}

pub(crate) fn ewp_out(id: i64) -> CommunicationLogDetail {
    EwpHttpCommunicationLogDetail::new(
        base(id),
        EwpAuthenticationMethod::Tls,
        HttpRequestLog::new("GET", "https://ewp.uw.edu.pl/institutions?hei_id=uw.edu.pl"),
    )
    .with_response(HttpResponseLog::new(503))
    .with_target_hei_id("uw.edu.pl")
    .into()
}

pub(crate) fn host_http(id: i64, direction: HttpDirection) -> CommunicationLogDetail {
    HostHttpCommunicationLogDetail::new(
        base(id),
        direction,
        "ulisboa",
        HttpRequestLog::new("GET", "https://node.ulisboa.pt/api/forward/ewp/institutions"),
    )
    .with_response(HttpResponseLog::new(404))
    .into()
}

pub(crate) fn all_details() -> Vec<CommunicationLogDetail> {
    vec![
        plugin_call(1),
        ewp_in(2),
        ewp_out(3),
        host_http(4, HttpDirection::In),
        host_http(5, HttpDirection::Out),
    ]
}

/// Smallest well-formed record for `kind`.
pub(crate) fn minimal_raw(kind: CommunicationKind) -> Value {
    let mut raw = json!({
        "type": kind.as_str(),
        "id": 7,
        "startProcessingDateTime": "2024-03-01T10:00:00Z",
    });
    let extra = match kind {
        CommunicationKind::HostPluginFunctionCall => json!({
            "hostCode": "ulisboa",
            "pluginId": "ulisboa-plugin",
            "className": "pt.ulisboa.PluginApi",
            "method": "findCourses",
        }),
        CommunicationKind::EwpIn | CommunicationKind::EwpOut => json!({
            "authenticationMethod": "HTTP_SIGNATURE",
            "request": {"method": "GET", "url": "https://ewp.example.org/echo"},
        }),
        CommunicationKind::HostIn | CommunicationKind::HostOut => json!({
            "hostCode": "ulisboa",
            "request": {"method": "GET", "url": "https://node.ulisboa.pt/api/forward"},
        }),
    };
    merge(&mut raw, extra);
    raw
}

/// Record for `kind` with every optional field populated.
pub(crate) fn full_raw(kind: CommunicationKind) -> Value {
    let mut raw = minimal_raw(kind);
    merge(
        &mut raw,
        json!({
            "endProcessingDateTime": "2024-03-01T10:00:01.500Z",
            "exceptionStacktrace": "java.net.SocketTimeoutException: Read timed out",
            "observations": "first attempt",
            "parentCommunicationId": 3,
        }),
    );
    let response = json!({
        "statusCode": 500,
        "headers": [{"name": "Content-Type", "value": "application/xml"}],
        "body": "<error-response/>",
    });
    let extra = match kind {
        CommunicationKind::HostPluginFunctionCall => json!({
            "arguments": ["pt.ulisboa", 2024, {"page": 1}],
            "result": [{"code": "LEIC"}],
        }),
        CommunicationKind::EwpIn => json!({
            "response": response,
            "heiIdsCoveredByClient": ["uw.edu.pl", "upc.edu"],
        }),
        CommunicationKind::EwpOut => json!({
            "response": response,
            "targetHeiId": "uw.edu.pl",
        }),
        CommunicationKind::HostIn | CommunicationKind::HostOut => json!({
            "response": response,
        }),
    };
    merge(&mut raw, extra);
    if kind.is_http() {
        raw["request"]["headers"] = json!([{"name": "Accept", "value": "application/xml"}]);
        raw["request"]["body"] = json!("hei_id=uw.edu.pl");
    }
    raw
}

/// Record for `kind` where every array field is present but empty.
pub(crate) fn empty_arrays_raw(kind: CommunicationKind) -> Value {
    let mut raw = minimal_raw(kind);
    match kind {
        CommunicationKind::HostPluginFunctionCall => raw["arguments"] = json!([]),
        CommunicationKind::EwpIn => {
            raw["heiIdsCoveredByClient"] = json!([]);
            raw["response"] = json!({"statusCode": 204, "headers": []});
        }
        _ => {}
    }
    if kind.is_http() {
        raw["request"]["headers"] = json!([]);
    }
    raw
}

fn merge(target: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
        target.extend(extra);
    }
}
