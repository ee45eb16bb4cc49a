//! Cross-field validation of scraping parameters
//!
//! Rules are checked in a fixed order and the first violation wins, so a
//! parameter set breaking several rules always reports the same one.

use crate::error::{Result, ZenrowsError};
use crate::params::ParameterSet;
use crate::types::ScreenshotFormat;

const MAX_SCREENSHOT_QUALITY: i32 = 100;
const MAX_SESSION_ID: i32 = 99_999;
const MAX_WAIT_MS: i32 = 30_000;

fn invalid(msg: &str) -> ZenrowsError {
    ZenrowsError::InvalidParameter(msg.to_string())
}

/// `Some` and non-empty
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn positive(value: Option<i32>) -> bool {
    value.is_some_and(|v| v > 0)
}

fn out_of_range(value: Option<i32>, max: i32) -> bool {
    value.is_some_and(|v| !(0..=max).contains(&v))
}

impl ParameterSet {
    /// Check the parameter set against the service's business rules
    ///
    /// Pure; never mutates `self`.
    ///
    /// # Errors
    /// `InvalidParameter` carrying the message of the first rule violated
    ///
    /// # Example
    /// ```
    /// use zenrows_core::ParameterSet;
    ///
    /// let params = ParameterSet::new().with_proxy_country("US");
    /// let err = params.validate().unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "proxy country is only available when using premium proxies"
    /// );
    /// ```
    pub fn validate(&self) -> Result<()> {
        // Ranges. Zero quality means "not provided".
        if out_of_range(self.screenshot_quality, MAX_SCREENSHOT_QUALITY) {
            return Err(invalid("screenshot quality must be between 1 and 100"));
        }
        if out_of_range(self.session_id, MAX_SESSION_ID) {
            return Err(invalid("session id must be between 0 and 99999"));
        }
        if out_of_range(self.wait_ms, MAX_WAIT_MS) {
            return Err(invalid("wait must be between 0 and 30000 (ms)"));
        }

        // Enumeration membership
        if self.response_type.as_ref().is_some_and(|t| !t.is_known()) {
            return Err(invalid("invalid response type"));
        }
        if self.screenshot_format.as_ref().is_some_and(|f| !f.is_known()) {
            return Err(invalid("invalid screenshot format"));
        }
        if self.outputs.iter().any(|o| !o.is_known()) {
            return Err(invalid("invalid output type"));
        }
        if self.block_resources.iter().any(|r| !r.is_known()) {
            return Err(invalid("invalid resource type"));
        }

        if !self.js_render {
            self.check_headless_settings()?;
        }
        if !self.screenshot {
            self.check_screenshot_settings()?;
        }

        if positive(self.screenshot_quality)
            && self.screenshot_format != Some(ScreenshotFormat::Jpeg)
        {
            return Err(invalid(
                "screenshot_quality is only available when screenshot_format is set to jpeg",
            ));
        }

        if is_set(&self.proxy_country) && !self.use_premium_proxies {
            return Err(invalid(
                "proxy country is only available when using premium proxies",
            ));
        }

        Ok(())
    }

    /// Settings that only make sense with `js_render`
    fn check_headless_settings(&self) -> Result<()> {
        if self.screenshot {
            return Err(invalid(
                "screenshot is only available when using javascript rendering",
            ));
        }
        if is_set(&self.js_instructions) {
            return Err(invalid(
                "js_instructions is only available when using javascript rendering",
            ));
        }
        if positive(self.wait_ms) {
            return Err(invalid("wait is only available when using javascript rendering"));
        }
        if is_set(&self.wait_for_selector) {
            return Err(invalid(
                "wait_for is only available when using javascript rendering",
            ));
        }
        if !self.block_resources.is_empty() {
            return Err(invalid(
                "block_resources is only available when using javascript rendering",
            ));
        }
        Ok(())
    }

    /// Settings that only make sense with `screenshot`
    fn check_screenshot_settings(&self) -> Result<()> {
        if self.screenshot_full_page {
            return Err(invalid(
                "screenshot_fullpage is only available when screenshot parameter is set to true",
            ));
        }
        if is_set(&self.screenshot_selector) {
            return Err(invalid(
                "screenshot_selector is only available when screenshot parameter is set to true",
            ));
        }
        if self.screenshot_format.is_some() {
            return Err(invalid(
                "screenshot_format is only available when screenshot parameter is set to true",
            ));
        }
        if positive(self.screenshot_quality) {
            return Err(invalid(
                "screenshot_quality is only available when screenshot parameter is set to true",
            ));
        }
        Ok(())
    }
}
