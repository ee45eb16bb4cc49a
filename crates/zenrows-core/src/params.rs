//! Scraping parameters sent alongside each request
//!
//! [`ParameterSet`] holds every directive the ZenRows Scraper API understands.
//! Validation lives in `validate.rs`, query encoding in `codec.rs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{OutputType, ResourceType, ResponseType, ScreenshotFormat};

/// Query parameter names understood by the ZenRows Scraper API
///
/// See <https://docs.zenrows.com/scraper-api/api-reference>.
pub mod keys {
    pub const API_KEY: &str = "apikey";
    pub const URL: &str = "url";

    pub const PREMIUM_PROXY: &str = "premium_proxy";
    pub const PROXY_COUNTRY: &str = "proxy_country";
    pub const AUTOPARSE: &str = "autoparse";
    pub const CSS_EXTRACTOR: &str = "css_extractor";
    pub const JSON_RESPONSE: &str = "json_response";
    pub const RESPONSE_TYPE: &str = "response_type";
    pub const OUTPUTS: &str = "outputs";
    pub const JS_RENDER: &str = "js_render";
    pub const JS_INSTRUCTIONS: &str = "js_instructions";
    pub const WAIT: &str = "wait";
    pub const WAIT_FOR: &str = "wait_for";
    pub const SCREENSHOT: &str = "screenshot";
    pub const SCREENSHOT_FULLPAGE: &str = "screenshot_fullpage";
    pub const SCREENSHOT_SELECTOR: &str = "screenshot_selector";
    pub const SCREENSHOT_FORMAT: &str = "screenshot_format";
    pub const SCREENSHOT_QUALITY: &str = "screenshot_quality";
    pub const ORIGINAL_STATUS: &str = "original_status";
    pub const SESSION_ID: &str = "session_id";
    pub const ALLOWED_STATUS_CODES: &str = "allowed_status_codes";
    pub const BLOCK_RESOURCES: &str = "block_resources";
    pub const CUSTOM_HEADERS: &str = "custom_headers";
}

/// Directives that modify how the scraping engine handles one request
///
/// Every field is optional. Booleans default to `false`; everything else uses
/// `None` or an empty collection for "not specified", so an explicit
/// `Some(0)` is distinguishable from an absent value.
///
/// Build it with struct literal syntax:
///
/// ```
/// use zenrows_core::{ParameterSet, ScreenshotFormat};
///
/// let params = ParameterSet {
///     js_render: true,
///     screenshot: true,
///     screenshot_format: Some(ScreenshotFormat::Jpeg),
///     screenshot_quality: Some(80),
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
///
/// or with the chaining helpers:
///
/// ```
/// use zenrows_core::{OutputType, ParameterSet};
///
/// let params = ParameterSet::new()
///     .with_premium_proxies()
///     .with_proxy_country("us")
///     .with_outputs([OutputType::Emails, OutputType::Links]);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    // Proxy settings
    #[serde(rename = "premium_proxy", skip_serializing_if = "is_false")]
    pub use_premium_proxies: bool,

    /// ISO country code of the exit node (premium proxies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_country: Option<String>,

    // Output modifiers
    #[serde(rename = "autoparse", skip_serializing_if = "is_false")]
    pub auto_parse: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_extractor: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub json_response: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<OutputType>,

    /// Render the page in a headless browser before returning it
    ///
    /// Slower, but executes JavaScript and gets past more anti-bot systems.
    /// Required by every other headless setting below.
    #[serde(skip_serializing_if = "is_false")]
    pub js_render: bool,

    /// Serialized JSON list of browser instructions run before the response is captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js_instructions: Option<String>,

    /// Fixed delay before capturing the page, at most 30000 ms
    #[serde(rename = "wait", skip_serializing_if = "Option::is_none")]
    pub wait_ms: Option<i32>,

    /// CSS selector that must appear before the page is captured
    ///
    /// The request fails with a timeout if the element never shows up.
    #[serde(rename = "wait_for", skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub screenshot: bool,

    #[serde(rename = "screenshot_fullpage", skip_serializing_if = "is_false")]
    pub screenshot_full_page: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_selector: Option<String>,

    /// Defaults to PNG on the service side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_format: Option<ScreenshotFormat>,

    /// JPEG quality between 1 and 100; `Some(0)` is treated as unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_quality: Option<i32>,

    // Advanced settings
    /// Pass the target's status code through instead of the service's 422
    #[serde(rename = "original_status", skip_serializing_if = "is_false")]
    pub return_original_status: bool,

    /// Sticky session between 0 and 99999; requests sharing it reuse one IP for up to 10 minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i32>,

    /// Non-2xx statuses whose body should still be returned (and billed)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_status_codes: Vec<u16>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub block_resources: Vec<ResourceType>,

    /// Extra headers forwarded to the target as-is
    ///
    /// Sent as HTTP header lines on the API request; the query string only
    /// carries a `custom_headers=true` marker.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_headers: BTreeMap<String, Vec<String>>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_premium_proxies(mut self) -> Self {
        self.use_premium_proxies = true;
        self
    }

    pub fn with_proxy_country(mut self, country: impl Into<String>) -> Self {
        self.proxy_country = Some(country.into());
        self
    }

    pub fn with_auto_parse(mut self) -> Self {
        self.auto_parse = true;
        self
    }

    pub fn with_css_extractor(mut self, extractor: impl Into<String>) -> Self {
        self.css_extractor = Some(extractor.into());
        self
    }

    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }

    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = OutputType>) -> Self {
        self.outputs = outputs.into_iter().collect();
        self
    }

    pub fn with_js_render(mut self) -> Self {
        self.js_render = true;
        self
    }

    pub fn with_js_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.js_instructions = Some(instructions.into());
        self
    }

    pub fn with_wait_ms(mut self, wait_ms: i32) -> Self {
        self.wait_ms = Some(wait_ms);
        self
    }

    pub fn with_wait_for_selector(mut self, selector: impl Into<String>) -> Self {
        self.wait_for_selector = Some(selector.into());
        self
    }

    pub fn with_screenshot(mut self) -> Self {
        self.screenshot = true;
        self
    }

    pub fn with_screenshot_full_page(mut self) -> Self {
        self.screenshot_full_page = true;
        self
    }

    pub fn with_screenshot_selector(mut self, selector: impl Into<String>) -> Self {
        self.screenshot_selector = Some(selector.into());
        self
    }

    pub fn with_screenshot_format(mut self, format: ScreenshotFormat) -> Self {
        self.screenshot_format = Some(format);
        self
    }

    pub fn with_screenshot_quality(mut self, quality: i32) -> Self {
        self.screenshot_quality = Some(quality);
        self
    }

    pub fn with_original_status(mut self) -> Self {
        self.return_original_status = true;
        self
    }

    pub fn with_session_id(mut self, session_id: i32) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_allowed_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.allowed_status_codes = codes.into_iter().collect();
        self
    }

    pub fn with_block_resources(
        mut self,
        resources: impl IntoIterator<Item = ResourceType>,
    ) -> Self {
        self.block_resources = resources.into_iter().collect();
        self
    }

    /// Append one value to a custom header, keeping earlier values
    pub fn with_custom_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.custom_headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let params = ParameterSet::new();
        assert!(!params.js_render);
        assert_eq!(params.wait_ms, None);
        assert_eq!(params.screenshot_quality, None);
        assert!(params.outputs.is_empty());
        assert!(params.custom_headers.is_empty());
    }

    #[test]
    fn test_builder_sets_fields() {
        let params = ParameterSet::new()
            .with_js_render()
            .with_wait_ms(1500)
            .with_block_resources([ResourceType::Image, ResourceType::Font])
            .with_session_id(42);

        assert!(params.js_render);
        assert_eq!(params.wait_ms, Some(1500));
        assert_eq!(params.block_resources, vec![ResourceType::Image, ResourceType::Font]);
        assert_eq!(params.session_id, Some(42));
    }

    #[test]
    fn test_custom_header_accumulates_values() {
        let params = ParameterSet::new()
            .with_custom_header("Referer", "https://example.com")
            .with_custom_header("Accept", "text/html")
            .with_custom_header("Accept", "application/json");

        assert_eq!(params.custom_headers["Referer"], vec!["https://example.com"]);
        assert_eq!(params.custom_headers["Accept"], vec!["text/html", "application/json"]);
    }

    #[test]
    fn test_json_uses_wire_names() {
        let params = ParameterSet::new()
            .with_premium_proxies()
            .with_proxy_country("es")
            .with_js_render()
            .with_wait_ms(500);

        let json = serde_json::to_value(&params).expect("Serialization should succeed");
        assert_eq!(
            json,
            serde_json::json!({
                "premium_proxy": true,
                "proxy_country": "es",
                "js_render": true,
                "wait": 500,
            })
        );
    }

    #[test]
    fn test_json_roundtrip_with_headers() {
        let params = ParameterSet::new()
            .with_outputs([OutputType::Emails, OutputType::All])
            .with_custom_header("X-Test", "1");

        let json = serde_json::to_string(&params).expect("Serialization should succeed");
        let parsed: ParameterSet =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(params, parsed);
    }
}
