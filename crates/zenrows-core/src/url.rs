//! Query string and target URL helpers
//!
//! Provides percent-encoded query strings for [`ParameterSet`] and the
//! target URL check applied before every scrape.

use reqwest::Url;

use crate::error::{Result, ZenrowsError};
use crate::params::ParameterSet;

/// Joins `(key, value)` pairs into a percent-encoded query string
///
/// # Example
/// ```
/// use zenrows_core::url::build_query_string;
/// let query = build_query_string([("css_extractor", r#"{"title":"h1"}"#), ("wait", "500")]);
/// assert_eq!(query, "css_extractor=%7B%22title%22%3A%22h1%22%7D&wait=500");
/// ```
pub fn build_query_string<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Splits a query string into decoded `(key, value)` pairs
///
/// Accepts an optional leading `?`, skips empty segments and treats `+`
/// as a space. A segment without `=` yields an empty value.
///
/// # Errors
/// `DecodeError` if a percent escape does not decode to UTF-8
///
/// # Example
/// ```
/// use zenrows_core::url::parse_query_string;
/// let pairs = parse_query_string("?wait_for=div%20.price&js_render=true").unwrap();
/// assert_eq!(pairs, vec![
///     ("wait_for".to_string(), "div .price".to_string()),
///     ("js_render".to_string(), "true".to_string()),
/// ]);
/// ```
pub fn parse_query_string(query: &str) -> Result<Vec<(String, String)>> {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| -> Result<(String, String)> {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            let key = decode_component(key, key)?;
            let value = decode_component(value, &key)?;
            Ok((key, value))
        })
        .collect()
}

fn decode_component(raw: &str, field: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ZenrowsError::decode(field, format!("invalid percent encoding: {}", e)))
}

/// Checks that a scrape target is a non-empty absolute URL
///
/// # Returns
/// The parsed URL, normalised the way it will be sent
///
/// # Errors
/// `InvalidTargetUrl` if the string is blank or does not parse
///
/// # Example
/// ```
/// use zenrows_core::url::validate_target_url;
/// assert!(validate_target_url("https://httpbin.io/anything").is_ok());
/// assert!(validate_target_url("").is_err());
/// assert!(validate_target_url("/relative/path").is_err());
/// ```
pub fn validate_target_url(target: &str) -> Result<Url> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(ZenrowsError::InvalidTargetUrl(
            "target url cannot be empty".to_string(),
        ));
    }

    Url::parse(trimmed).map_err(|e| ZenrowsError::InvalidTargetUrl(format!("{}: {}", trimmed, e)))
}

impl ParameterSet {
    /// Encode into a percent-encoded query string (without leading `?`)
    pub fn to_query_string(&self) -> String {
        build_query_string(self.encode())
    }

    /// Decode from a raw query string such as the one of an inbound request
    ///
    /// # Errors
    /// `DecodeError` for bad percent escapes, unknown keys or bad values
    pub fn from_query_str(query: &str) -> Result<Self> {
        ParameterSet::decode(parse_query_string(query)?)
    }
}
