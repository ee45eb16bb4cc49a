//! Responses returned by the ZenRows Scraper API
//!
//! The body is read eagerly so a [`Response`] can be inspected any number
//! of times after the connection has been released.

use std::time::{Duration, Instant, SystemTime};

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

use crate::error::{Result, ZenrowsError};
use crate::problem::{PROBLEM_CONTENT_TYPE, Problem};

/// Prefix the service puts on headers copied from the target page
const TARGET_HEADER_PREFIX: &str = "z-";
const TARGET_SET_COOKIE: &str = "z-set-cookie";

/// A cookie the target page tried to set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCookie {
    pub name: String,
    pub value: String,
    /// Attributes such as `Path` or `HttpOnly`, in order; flags have an empty value
    pub attributes: Vec<(String, String)>,
}

impl TargetCookie {
    /// Parse one `Set-Cookie` line; `None` if it has no `name=value` pair
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let attributes = parts
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .map(|attr| match attr.split_once('=') {
                Some((key, val)) => (key.trim().to_string(), val.trim().to_string()),
                None => (attr.to_string(), String::new()),
            })
            .collect();

        Some(Self {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
            attributes,
        })
    }

    /// Look up an attribute by name, ignoring case
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Fully-read response of a scrape request
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    elapsed: Duration,
    received_at: SystemTime,
}

impl Response {
    /// Read a `reqwest` response to the end
    pub(crate) async fn read(response: reqwest::Response, started: Instant) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ZenrowsError::HttpError)?;

        Ok(Self {
            status,
            headers,
            body: body.to_vec(),
            elapsed: started.elapsed(),
            received_at: SystemTime::now(),
        })
    }

    /// Raw body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// All headers of the API response
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body size in bytes
    pub fn size(&self) -> usize {
        self.body.len()
    }

    /// Time from sending the request to having read the body
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn received_at(&self) -> SystemTime {
        self.received_at
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status 400 or above
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Headers the target page sent, as forwarded with the `Z-` prefix
    pub fn target_headers(&self) -> HeaderMap {
        let mut target = HeaderMap::new();
        for (name, value) in &self.headers {
            if name.as_str().starts_with(TARGET_HEADER_PREFIX) {
                target.append(name.clone(), value.clone());
            }
        }
        target
    }

    /// Cookies the target page set; unparsable lines are skipped
    pub fn target_cookies(&self) -> Vec<TargetCookie> {
        self.headers
            .get_all(TARGET_SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(TargetCookie::parse)
            .collect()
    }

    /// Problem payload of a failed request, if the service sent one
    pub fn problem(&self) -> Option<Problem> {
        if !self.is_error() {
            return None;
        }

        let content_type = self
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())?;
        let mime = content_type.split(';').next().unwrap_or(content_type).trim();
        if !mime.eq_ignore_ascii_case(PROBLEM_CONTENT_TYPE) {
            return None;
        }

        Problem::from_slice(&self.body)
    }

    /// The problem payload as an error, if any
    pub fn error(&self) -> Option<ZenrowsError> {
        self.problem().map(ZenrowsError::Problem)
    }
}
