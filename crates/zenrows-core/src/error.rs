//! Error types for the ZenRows Scraper API client
//!
//! Provides a single error enum covering parameter validation, query
//! decoding, client misconfiguration, transport failures and problem
//! payloads reported by the service.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::problem::Problem;

/// Error type for all ZenRows client operations
///
/// Implements Display for human-readable messages and Serialize so errors
/// can be forwarded to JSON consumers as plain strings.
#[derive(Error, Debug)]
pub enum ZenrowsError {
    /// A scraping parameter violated a range, enumeration or dependency rule
    ///
    /// The message is the exact rule text, e.g.
    /// "wait must be between 0 and 30000 (ms)".
    #[error("{0}")]
    InvalidParameter(String),

    /// A flattened parameter map could not be mapped back to a `ParameterSet`
    #[error("Failed to decode parameter `{field}`: {reason}")]
    DecodeError { field: String, reason: String },

    /// The client has no base URL or API key
    #[error("zenrows scraper api client is not configured")]
    NotConfigured,

    /// HTTP method other than GET, POST or PUT
    #[error("invalid http method {0}. supported methods are: GET, POST, PUT")]
    InvalidHttpMethod(String),

    /// Missing or malformed target URL
    #[error("invalid target url: {0}")]
    InvalidTargetUrl(String),

    /// A custom header name or value cannot be sent over HTTP
    #[error("invalid custom header: {0}")]
    InvalidHeader(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The service answered with a problem payload
    #[error("{0}")]
    Problem(Problem),
}

impl ZenrowsError {
    /// Shorthand for a decode failure on `field`
    pub(crate) fn decode(field: &str, reason: impl Into<String>) -> Self {
        ZenrowsError::DecodeError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the failure is worth another attempt
    ///
    /// Any transport failure qualifies, including a body that breaks off
    /// while being read. Local errors never change on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ZenrowsError::HttpError(_))
    }
}

impl Serialize for ZenrowsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for ZenRows operations
pub type Result<T> = std::result::Result<T, ZenrowsError>;
