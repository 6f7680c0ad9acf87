//! Configuration validation issues.
//!
//! Validation never aborts loading: it returns structured issues with a
//! severity, and the caller decides whether to warn or stop.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a fallback value is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A numeric setting lies outside its accepted range.
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    /// Check `value` against `min..=max`, producing an issue when outside.
    pub fn check_range(
        field: &str,
        value: i64,
        min: i64,
        max: i64,
        severity: Severity,
    ) -> Option<ConfigIssue> {
        if (min..=max).contains(&value) {
            return None;
        }
        Some(ConfigIssue {
            severity,
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            },
            message: format!("{}: {} is outside {}..={}", field, value, min, max),
        })
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_has_no_issue() {
        assert!(ConfigIssue::check_range("query.default_limit", 20, 1, 50, Severity::Error).is_none());
        assert!(ConfigIssue::check_range("query.default_limit", 50, 1, 50, Severity::Error).is_none());
    }

    #[test]
    fn test_out_of_range_issue() {
        let issue =
            ConfigIssue::check_range("query.default_limit", 0, 1, 50, Severity::Error).unwrap();
        assert!(issue.is_error());
        assert_eq!(issue.message, "query.default_limit: 0 is outside 1..=50");
        assert_eq!(
            issue.code,
            ConfigIssueCode::OutOfRange {
                field: "query.default_limit".to_string(),
                value: 0,
                min: 1,
                max: 50,
            }
        );
    }
}
