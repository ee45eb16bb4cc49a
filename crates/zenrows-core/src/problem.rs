//! Problem payloads returned by the ZenRows Scraper API on failure
//!
//! Failed requests carry an RFC 7807 style JSON body with the
//! `application/problem+json` content type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content type marking a problem payload
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Machine-readable error body reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// URI identifying the problem type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Service-specific error code (e.g. "REQS001")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Any further members of the payload
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Problem {
    /// Parse a problem payload from a response body
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => write!(f, "{}: {}", title, detail)?,
            (Some(text), None) | (None, Some(text)) => f.write_str(text)?,
            (None, None) => match self.status {
                Some(status) => write!(f, "request failed with status {}", status)?,
                None => f.write_str("request failed")?,
            },
        }
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_parse_full() {
        let body = br#"{
            "type": "https://docs.zenrows.com/api-error-codes#REQS001",
            "title": "Requests Limit Reached",
            "detail": "Your current plan has reached its request limit.",
            "status": 402,
            "code": "REQS001",
            "instance": "/v1"
        }"#;

        let problem = Problem::from_slice(body).expect("payload should parse");
        assert_eq!(problem.status, Some(402));
        assert_eq!(problem.code.as_deref(), Some("REQS001"));
        assert_eq!(problem.instance.as_deref(), Some("/v1"));
        assert!(problem.extra.is_empty());
        assert_eq!(
            problem.to_string(),
            "Requests Limit Reached: Your current plan has reached its request limit. (REQS001)"
        );
    }

    #[test]
    fn test_problem_keeps_extra_members() {
        let body = br#"{"title":"Bad Request","status":400,"invalid_params":["wait"]}"#;
        let problem = Problem::from_slice(body).expect("payload should parse");
        assert_eq!(problem.extra["invalid_params"], serde_json::json!(["wait"]));
        assert_eq!(problem.to_string(), "Bad Request");
    }

    #[test]
    fn test_problem_display_status_only() {
        let problem = Problem {
            status: Some(500),
            ..Default::default()
        };
        assert_eq!(problem.to_string(), "request failed with status 500");
    }

    #[test]
    fn test_problem_rejects_non_json() {
        assert!(Problem::from_slice(b"<html>oops</html>").is_none());
    }
}
