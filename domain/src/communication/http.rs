//! HTTP request/response records embedded in HTTP communication logs

use serde::{Deserialize, Serialize};

/// How an EWP node authenticated (inbound) or was authenticated against (outbound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EwpAuthenticationMethod {
    HttpSignature,
    Tls,
    Anonymous,
}

impl EwpAuthenticationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            EwpAuthenticationMethod::HttpSignature => "HTTP_SIGNATURE",
            EwpAuthenticationMethod::Tls => "TLS",
            EwpAuthenticationMethod::Anonymous => "ANONYMOUS",
        }
    }
}

impl std::fmt::Display for EwpAuthenticationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpHeaderLog {
    pub name: String,
    pub value: String,
}

impl HttpHeaderLog {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpRequestLog {
    /// HTTP method (e.g., "GET", "POST")
    pub method: String,
    pub url: String,
    /// `None` when the record carries no `headers` field at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HttpHeaderLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpRequestLog {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: None,
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push(HttpHeaderLog::new(name, value));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(self.headers(), name)
    }

    pub fn headers(&self) -> &[HttpHeaderLog] {
        self.headers.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HttpResponseLog {
    pub status_code: u16,
    /// `None` when the record carries no `headers` field at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HttpHeaderLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpResponseLog {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: None,
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push(HttpHeaderLog::new(name, value));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(self.headers(), name)
    }

    pub fn headers(&self) -> &[HttpHeaderLog] {
        self.headers.as_deref().unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Structural check on the status line.
    pub fn validate(&self) -> Result<(), String> {
        if (100..=599).contains(&self.status_code) {
            Ok(())
        } else {
            Err(format!("status code {} out of range", self.status_code))
        }
    }
}

fn find_header<'a>(headers: &'a [HttpHeaderLog], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}
