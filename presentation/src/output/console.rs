//! Console output formatter for decode reports and log inspection

use colored::Colorize;
use commlog_application::{DecodeReport, InspectLogsOutput, LogDetailView};
use commlog_domain::{
    CommunicationLogCodec, CommunicationLogDetail, CommunicationLogSummary, HttpHeaderLog,
    HttpRequestLog, HttpResponseLog, TRUNCATION_SUFFIX, VariantRegistry, truncate_with_suffix,
};
use serde_json::{Value, json};

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    // ==================== Decode Report ====================

    /// Format a batch decode report
    pub fn format_report(report: &DecodeReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Decode Report"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}   {} {}   {} {}\n",
            "Records:".cyan().bold(),
            report.total(),
            "Accepted:".green().bold(),
            report.accepted_count(),
            "Rejected:".red().bold(),
            report.rejected_count()
        ));

        let by_kind = report.accepted_by_kind();
        if !by_kind.is_empty() {
            output.push_str(&Self::section_header("Accepted by type"));
            for (kind, count) in &by_kind {
                output.push_str(&format!("  {:<28} {:>6}\n", kind.as_str(), count));
            }
        }

        let by_category = report.rejections_by_category();
        if !by_category.is_empty() {
            output.push_str(&Self::section_header("Rejected by category"));
            for (category, count) in &by_category {
                output.push_str(&format!("  {:<28} {:>6}\n", category, count));
            }

            output.push_str(&Self::section_header("Rejections"));
            for (line, error) in report.rejections() {
                output.push_str(&format!(
                    "  {} {}\n",
                    format!("line {:>5}:", line).yellow(),
                    error
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a batch decode report as JSON
    pub fn format_report_json(report: &DecodeReport) -> String {
        let rejections: Vec<Value> = report
            .rejections()
            .map(|(line, error)| {
                json!({
                    "line": line,
                    "category": error.category(),
                    "field": error.field(),
                    "message": error.to_string(),
                })
            })
            .collect();
        let by_kind: serde_json::Map<String, Value> = report
            .accepted_by_kind()
            .into_iter()
            .map(|(kind, count)| (kind.as_str().to_string(), json!(count)))
            .collect();

        Self::pretty(&json!({
            "total": report.total(),
            "accepted": report.accepted_count(),
            "rejected": report.rejected_count(),
            "acceptedByType": by_kind,
            "rejectedByCategory": report.rejections_by_category(),
            "rejections": rejections,
        }))
    }

    // ==================== Listing ====================

    /// Format one page of summaries as a table
    pub fn format_page(page: &InspectLogsOutput) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:>8}  {:<26}  {:<24}  {:>8}  {:>6}  {}\n",
            "ID".bold(),
            "TYPE".bold(),
            "START".bold(),
            "MS".bold(),
            "STATUS".bold(),
            "TARGET".bold()
        ));
        for summary in &page.summaries {
            output.push_str(&Self::summary_row(summary));
        }

        let shown_end = page.offset + page.summaries.len();
        let range = if page.summaries.is_empty() {
            "none".to_string()
        } else {
            format!("{}-{}", page.offset + 1, shown_end)
        };
        output.push_str(&format!(
            "\n{} {} of {}\n",
            "Showing".dimmed(),
            range,
            page.total_results
        ));
        output
    }

    /// Format one page of summaries as JSON
    pub fn format_page_json(page: &InspectLogsOutput) -> String {
        Self::pretty(&json!({
            "totalResults": page.total_results,
            "offset": page.offset,
            "limit": page.limit,
            "data": page.summaries,
        }))
    }

    fn summary_row(summary: &CommunicationLogSummary) -> String {
        let status = match summary.status_code {
            Some(code) if code >= 400 => code.to_string().red().to_string(),
            Some(code) => code.to_string().green().to_string(),
            None => "-".to_string(),
        };
        let marker = if summary.has_exception {
            " !".red().bold().to_string()
        } else {
            String::new()
        };
        format!(
            "{:>8}  {:<26}  {:<24}  {:>8}  {:>6}  {}{}\n",
            summary.id,
            summary.kind.as_str(),
            summary.start_processing_date_time.to_rfc3339(),
            summary
                .duration_ms
                .map(|ms| ms.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status,
            summary.target,
            marker
        )
    }

    // ==================== Detail ====================

    /// Format a single log with its children
    ///
    /// Observations longer than `observations_max` bytes are cut.
    pub fn format_detail(view: &LogDetailView, observations_max: usize) -> String {
        let detail = &view.detail;
        let base = detail.base();
        let mut output = String::new();

        output.push_str(&Self::header(&format!(
            "Communication {} ({})",
            base.id,
            detail.kind()
        )));
        output.push('\n');

        Self::field(&mut output, "Start", base.start_processing_date_time.to_rfc3339());
        if let Some(end) = base.end_processing_date_time {
            Self::field(&mut output, "End", end.to_rfc3339());
        }
        if let Some(ms) = base.duration_ms() {
            Self::field(&mut output, "Duration", format!("{} ms", ms));
        }
        if let Some(parent) = base.parent_communication_id {
            Self::field(&mut output, "Parent", parent.to_string());
        }

        match detail {
            CommunicationLogDetail::HostPluginFunctionCall(call) => {
                Self::field(&mut output, "Host", call.host_code.clone());
                Self::field(&mut output, "Plugin", call.plugin_id.clone());
                Self::field(&mut output, "Function", call.target());
                output.push_str(&Self::section_header("Arguments"));
                if call.arguments().is_empty() {
                    output.push_str("  (none)\n");
                }
                for (i, argument) in call.arguments().iter().enumerate() {
                    output.push_str(&format!("  [{}] {}\n", i, argument));
                }
                if let Some(result) = &call.result {
                    output.push_str(&Self::section_header("Result"));
                    output.push_str(&format!("  {}\n", result));
                }
            }
            CommunicationLogDetail::EwpIn(ewp) => {
                Self::field(&mut output, "Auth", ewp.authentication_method.to_string());
                if !ewp.hei_ids_covered_by_client().is_empty() {
                    Self::field(
                        &mut output,
                        "Client HEIs",
                        ewp.hei_ids_covered_by_client().join(", "),
                    );
                }
                Self::http_exchange(&mut output, &ewp.request, ewp.response.as_ref());
            }
            CommunicationLogDetail::EwpOut(ewp) => {
                Self::field(&mut output, "Auth", ewp.authentication_method.to_string());
                if let Some(target) = &ewp.target_hei_id {
                    Self::field(&mut output, "Target HEI", target.clone());
                }
                Self::http_exchange(&mut output, &ewp.request, ewp.response.as_ref());
            }
            CommunicationLogDetail::HostHttp(host) => {
                Self::field(&mut output, "Host", host.host_code.clone());
                Self::field(&mut output, "Direction", host.direction().as_str().to_string());
                Self::http_exchange(&mut output, &host.request, host.response.as_ref());
            }
        }

        if let Some(stacktrace) = &base.exception_stacktrace {
            output.push_str(&Self::section_header("Exception"));
            output.push_str(&format!("{}\n", stacktrace.red()));
        }

        if let Some(observations) = &base.observations {
            output.push_str(&Self::section_header("Observations"));
            output.push_str(&truncate_with_suffix(
                observations.clone(),
                observations_max,
                TRUNCATION_SUFFIX,
            ));
            output.push('\n');
        }

        if !view.children.is_empty() {
            output.push_str(&Self::section_header("Children"));
            for child in &view.children {
                output.push_str(&Self::summary_row(child));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a single log as JSON, the log itself in canonical encoding
    pub fn format_detail_json(view: &LogDetailView) -> String {
        let data = CommunicationLogCodec::default()
            .encode(&view.detail)
            .unwrap_or_else(|e| json!({"error": e.to_string()}));
        Self::pretty(&json!({
            "data": data,
            "children": view.children,
        }))
    }

    fn http_exchange(
        output: &mut String,
        request: &HttpRequestLog,
        response: Option<&HttpResponseLog>,
    ) {
        output.push_str(&Self::section_header("Request"));
        output.push_str(&format!("  {} {}\n", request.method.bold(), request.url));
        Self::headers(output, request.headers());
        if let Some(body) = &request.body {
            output.push_str(&format!("\n{}\n", body));
        }

        output.push_str(&Self::section_header("Response"));
        match response {
            Some(response) => {
                let status = if response.is_success() {
                    response.status_code.to_string().green()
                } else {
                    response.status_code.to_string().red()
                };
                output.push_str(&format!("  {} {}\n", "Status".bold(), status));
                Self::headers(output, response.headers());
                if let Some(body) = &response.body {
                    output.push_str(&format!("\n{}\n", body));
                }
            }
            None => output.push_str("  (no response)\n"),
        }
    }

    fn headers(output: &mut String, headers: &[HttpHeaderLog]) {
        for header in headers {
            output.push_str(&format!("  {}: {}\n", header.name.dimmed(), header.value));
        }
    }

    fn field(output: &mut String, label: &str, value: String) {
        output.push_str(&format!(
            "{} {}\n",
            format!("{:<12}", format!("{}:", label)).cyan().bold(),
            value
        ));
    }

    // ==================== Registry ====================

    /// Format the tag → shape table
    pub fn format_registry(registry: &VariantRegistry) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<28}  {}\n",
            "TYPE".bold(),
            "SHAPE".bold()
        ));
        for entry in registry.entries() {
            output.push_str(&format!(
                "{:<28}  {}\n",
                entry.kind.as_str(),
                entry.shape.type_name()
            ));
        }
        output
    }

    /// Format the tag → shape table as JSON
    pub fn format_registry_json(registry: &VariantRegistry) -> String {
        let entries: Vec<Value> = registry
            .entries()
            .iter()
            .map(|entry| json!({"type": entry.kind, "shape": entry.shape.type_name()}))
            .collect();
        Self::pretty(&Value::Array(entries))
    }

    // ==================== Helpers ====================

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{}\n{}\n",
            line.cyan(),
            format!("  {}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).yellow().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use commlog_application::RecordOutcome;
    use commlog_domain::{
        CodecError, CommunicationLogBase, EwpAuthenticationMethod, EwpHttpCommunicationLogDetail,
        HostPluginFunctionCallLogDetail,
    };

    fn ewp_out() -> CommunicationLogDetail {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        EwpHttpCommunicationLogDetail::new(
            CommunicationLogBase::new(3, start)
                .with_end(start + chrono::Duration::milliseconds(120))
                .with_observations("retried twice after a timeout"),
            EwpAuthenticationMethod::HttpSignature,
            HttpRequestLog::new("GET", "https://ewp.uw.edu.pl/iias?hei_id=uw.edu.pl")
                .with_header("Accept", "application/xml"),
        )
        .with_response(HttpResponseLog::new(503).with_body("<error-response/>"))
        .with_target_hei_id("uw.edu.pl")
        .into()
    }

    fn plugin_call() -> CommunicationLogDetail {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 59, 0).unwrap();
        HostPluginFunctionCallLogDetail::new(
            CommunicationLogBase::new(1, start),
            "ulisboa",
            "ulisboa-plugin",
            "pt.ulisboa.PluginApi",
            "findCourses",
        )
        .with_argument("pt.ulisboa")
        .into()
    }

    fn report() -> DecodeReport {
        DecodeReport {
            outcomes: vec![
                RecordOutcome {
                    line: 1,
                    result: Ok(ewp_out()),
                },
                RecordOutcome {
                    line: 2,
                    result: Err(CodecError::UnknownVariant("UNKNOWN_TAG".to_string())),
                },
                RecordOutcome {
                    line: 3,
                    result: Err(CodecError::schema_mismatch("request", "missing required field")),
                },
            ],
        }
    }

    #[test]
    fn test_report_lists_rejections() {
        let text = ConsoleFormatter::format_report(&report());
        assert!(text.contains("EWP_OUT"));
        assert!(text.contains("unknown_variant"));
        assert!(text.contains("Unknown communication log type: UNKNOWN_TAG"));
        assert!(text.contains("Schema mismatch on field 'request'"));
    }

    #[test]
    fn test_report_json() {
        let value: Value =
            serde_json::from_str(&ConsoleFormatter::format_report_json(&report())).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["accepted"], 1);
        assert_eq!(value["rejectedByCategory"]["schema_mismatch"], 1);
        assert_eq!(value["acceptedByType"]["EWP_OUT"], 1);
        assert_eq!(value["rejections"][1]["field"], "request");
        assert_eq!(value["rejections"][0]["field"], Value::Null);
    }

    #[test]
    fn test_page_table() {
        let page = InspectLogsOutput {
            summaries: vec![
                CommunicationLogSummary::from(&plugin_call()),
                CommunicationLogSummary::from(&ewp_out()),
            ],
            total_results: 7,
            offset: 0,
            limit: 2,
        };
        let text = ConsoleFormatter::format_page(&page);
        assert!(text.contains("pt.ulisboa.PluginApi#findCourses"));
        assert!(text.contains("https://ewp.uw.edu.pl/iias?hei_id=uw.edu.pl"));
        assert!(text.contains("1-2 of 7"));
    }

    #[test]
    fn test_empty_page() {
        let page = InspectLogsOutput {
            summaries: Vec::new(),
            total_results: 0,
            offset: 0,
            limit: 20,
        };
        assert!(ConsoleFormatter::format_page(&page).contains("none of 0"));
    }

    #[test]
    fn test_page_json_uses_summary_fields() {
        let page = InspectLogsOutput {
            summaries: vec![CommunicationLogSummary::from(&ewp_out())],
            total_results: 1,
            offset: 0,
            limit: 20,
        };
        let value: Value =
            serde_json::from_str(&ConsoleFormatter::format_page_json(&page)).unwrap();
        assert_eq!(value["totalResults"], 1);
        assert_eq!(value["data"][0]["type"], "EWP_OUT");
        assert_eq!(value["data"][0]["statusCode"], 503);
    }

    #[test]
    fn test_detail_shows_http_exchange() {
        let view = LogDetailView {
            detail: ewp_out(),
            children: Vec::new(),
        };
        let text = ConsoleFormatter::format_detail(&view, 1024);
        assert!(text.contains("uw.edu.pl"));
        assert!(text.contains("application/xml"));
        assert!(text.contains("<error-response/>"));
        assert!(text.contains("120 ms"));
        assert!(text.contains("retried twice after a timeout"));
    }

    #[test]
    fn test_detail_truncates_observations() {
        let view = LogDetailView {
            detail: ewp_out(),
            children: Vec::new(),
        };
        let text = ConsoleFormatter::format_detail(&view, 24);
        assert!(text.contains(TRUNCATION_SUFFIX));
        assert!(!text.contains("after a timeout"));
    }

    #[test]
    fn test_observations_limit_only_applies_to_table() {
        let view = LogDetailView {
            detail: ewp_out(),
            children: Vec::new(),
        };
        ConsoleFormatter::format_detail(&view, 24);
        assert_eq!(
            view.detail.base().observations.as_deref(),
            Some("retried twice after a timeout")
        );

        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_detail_json(&view)).unwrap();
        assert_eq!(json["data"]["observations"], "retried twice after a timeout");
    }

    #[test]
    fn test_detail_lists_children() {
        let view = LogDetailView {
            detail: plugin_call(),
            children: vec![CommunicationLogSummary::from(&ewp_out())],
        };
        let text = ConsoleFormatter::format_detail(&view, 1024);
        assert!(text.contains("findCourses"));
        assert!(text.contains("\"pt.ulisboa\""));
        assert!(text.contains("https://ewp.uw.edu.pl/iias?hei_id=uw.edu.pl"));
    }

    #[test]
    fn test_detail_json_is_canonical_encoding() {
        let view = LogDetailView {
            detail: ewp_out(),
            children: Vec::new(),
        };
        let value: Value =
            serde_json::from_str(&ConsoleFormatter::format_detail_json(&view)).unwrap();
        assert_eq!(
            value["data"],
            CommunicationLogCodec::default().encode(&view.detail).unwrap()
        );
    }

    #[test]
    fn test_registry_json_lists_every_tag() {
        let value: Value = serde_json::from_str(&ConsoleFormatter::format_registry_json(
            VariantRegistry::standard(),
        ))
        .unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[3]["type"], "HOST_IN");
        assert_eq!(entries[3]["shape"], entries[4]["shape"]);
    }

    #[test]
    fn test_registry_table() {
        let text = ConsoleFormatter::format_registry(VariantRegistry::standard());
        assert!(text.contains("HOST_PLUGIN_FUNCTION_CALL"));
        assert!(text.contains("HOST_OUT"));
    }
}
