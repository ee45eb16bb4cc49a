//! Main scraping API for the ZenRows Scraper API
//!
//! Provides the high-level API combining parameter validation, query
//! encoding and the HTTP transport.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::client::{ClientConfig, ZenrowsClient};
use crate::error::{Result, ZenrowsError};
use crate::params::{ParameterSet, keys};
use crate::response::Response;
use crate::url::validate_target_url;

/// Methods the service accepts for forwarding to the target
const SUPPORTED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::PUT];

/// Main client API for the ZenRows Scraper API
///
/// Checks the request locally (configuration, method, target URL and
/// scraping parameters) before anything is sent, so invalid requests are
/// never billed.
pub struct ZenrowsScraper {
    client: ZenrowsClient,
}

impl ZenrowsScraper {
    /// Create a new scraper with default configuration
    ///
    /// The API key is read from `ZENROWS_API_KEY`.
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = ZenrowsClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Arguments
    /// * `config` - Custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = ZenrowsClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Scrape `target_url` through the API with the given method and parameters
    ///
    /// # Arguments
    /// * `method` - GET, POST or PUT; forwarded to the target
    /// * `target_url` - Absolute URL of the page to scrape
    /// * `params` - Optional scraping directives, validated before sending
    /// * `body` - Optional request body forwarded to the target
    ///
    /// # Returns
    /// The API response. Failed scrapes still return `Ok`; check
    /// [`Response::error`] for the service's problem payload.
    ///
    /// # Errors
    /// - `NotConfigured` if base URL or API key is missing
    /// - `InvalidHttpMethod` for methods other than GET, POST, PUT
    /// - `InvalidTargetUrl` if the target is empty or malformed
    /// - `InvalidParameter` if the parameters break a business rule
    /// - `InvalidHeader` if a custom header cannot be sent
    /// - `HttpError` if the request fails after all retries
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> zenrows_core::Result<()> {
    /// use zenrows_core::{ClientConfig, Method, ParameterSet, ZenrowsScraper};
    ///
    /// let scraper = ZenrowsScraper::with_config(ClientConfig::new("YOUR_API_KEY"))?;
    /// let params = ParameterSet::new().with_js_render().with_wait_for_selector(".price");
    /// let response = scraper
    ///     .scrape(Method::GET, "https://httpbin.io/anything", Some(&params), None)
    ///     .await?;
    /// println!("{}", response.text());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape(
        &self,
        method: Method,
        target_url: &str,
        params: Option<&ParameterSet>,
        body: Option<String>,
    ) -> Result<Response> {
        if !self.client.is_configured() {
            return Err(ZenrowsError::NotConfigured);
        }

        if !SUPPORTED_METHODS.contains(&method) {
            return Err(ZenrowsError::InvalidHttpMethod(method.to_string()));
        }

        let target = validate_target_url(target_url)?;
        debug!(%method, target = %target, "scraping target");

        let mut query = vec![(keys::URL.to_string(), target.to_string())];
        let mut headers = HeaderMap::new();

        if let Some(params) = params {
            params.validate()?;
            headers = build_headers(params)?;
            query.extend(params.encode());
        }

        self.client.execute(method, &query, headers, body).await
    }

    /// Send a GET request through the API
    ///
    /// # Errors
    /// Same as [`ZenrowsScraper::scrape`]
    pub async fn get(&self, target_url: &str, params: Option<&ParameterSet>) -> Result<Response> {
        self.scrape(Method::GET, target_url, params, None).await
    }

    /// Send a POST request with `body` through the API
    ///
    /// # Errors
    /// Same as [`ZenrowsScraper::scrape`]
    pub async fn post(
        &self,
        target_url: &str,
        params: Option<&ParameterSet>,
        body: impl Into<String>,
    ) -> Result<Response> {
        self.scrape(Method::POST, target_url, params, Some(body.into()))
            .await
    }

    /// Send a PUT request with `body` through the API
    ///
    /// # Errors
    /// Same as [`ZenrowsScraper::scrape`]
    pub async fn put(
        &self,
        target_url: &str,
        params: Option<&ParameterSet>,
        body: impl Into<String>,
    ) -> Result<Response> {
        self.scrape(Method::PUT, target_url, params, Some(body.into()))
            .await
    }

    /// Get a reference to the underlying transport
    pub fn client(&self) -> &ZenrowsClient {
        &self.client
    }
}

/// Convert custom headers into request headers, keeping every value
fn build_headers(params: &ParameterSet) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, values) in &params.custom_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ZenrowsError::InvalidHeader(format!("{}: {}", name, e)))?;

        for value in values {
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ZenrowsError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.append(header_name.clone(), header_value);
        }
    }

    Ok(headers)
}
