//! HTTP transport for the ZenRows Scraper API
//!
//! Wraps `reqwest` with authentication, retries with exponential backoff
//! on transient failures, and an optional cap on in-flight requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Result, ZenrowsError};
use crate::params::keys;
use crate::response::Response;
use crate::version::user_agent;

/// Default endpoint of the Scraper API
pub const DEFAULT_BASE_URL: &str = "https://api.zenrows.com/v1";

/// Environment variable read for the API key when none is configured
pub const API_KEY_ENV: &str = "ZENROWS_API_KEY";

/// Statuses worth another attempt: unprocessable (the service's generic
/// scrape failure), too many requests, internal error
pub const RETRYABLE_STATUS_CODES: [StatusCode; 3] = [
    StatusCode::UNPROCESSABLE_ENTITY,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
];

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint (default: `https://api.zenrows.com/v1`)
    pub base_url: String,
    /// Secret API key (default: `$ZENROWS_API_KEY`, or empty)
    pub api_key: String,
    /// Extra attempts after a retryable failure (default: 0)
    pub max_retries: u32,
    /// Backoff before the first retry, doubled on each further retry (default: 5s)
    pub retry_wait: Duration,
    /// Upper bound for a single backoff (default: 30s)
    pub retry_max_wait: Duration,
    /// Maximum requests in flight at once; `None` or `Some(0)` means unlimited
    ///
    /// Going over the plan's concurrency limit makes the service answer 429,
    /// and repeated violations can get the account suspended.
    pub max_concurrent_requests: Option<usize>,
    /// Request timeout in seconds (default: 180)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            max_retries: 0,
            retry_wait: Duration::from_secs(5),
            retry_max_wait: Duration::from_secs(30),
            max_concurrent_requests: None,
            timeout_secs: 180,
        }
    }
}

impl ClientConfig {
    /// Default configuration with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_wait(mut self, retry_wait: Duration) -> Self {
        self.retry_wait = retry_wait;
        self
    }

    pub fn with_retry_max_wait(mut self, retry_max_wait: Duration) -> Self {
        self.retry_max_wait = retry_max_wait;
        self
    }

    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = Some(max);
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Caps the number of requests in flight
///
/// Each request holds a permit from before the first attempt until its
/// last retry has finished.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    max: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter allowing `max` concurrent requests
    ///
    /// # Arguments
    /// * `max` - Maximum number of permits handed out at once
    pub fn new(max: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    /// Wait for a free slot
    ///
    /// The slot is released when the returned permit is dropped. Yields
    /// `None` only if the semaphore was closed, which this type never does.
    pub async fn acquire(&self) -> Option<SemaphorePermit<'_>> {
        if self.semaphore.available_permits() == 0 {
            debug!(max = self.max, "waiting for a concurrency slot");
        }
        self.semaphore.acquire().await.ok()
    }

    /// Slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Configured maximum
    pub fn max(&self) -> usize {
        self.max
    }
}

/// HTTP client wrapper with authentication, retries and concurrency cap
///
/// Handles all HTTP communication with the Scraper API:
/// - `apikey` query parameter and SDK User-Agent on every request
/// - Retries with exponential backoff on errors and retryable statuses
/// - Optional concurrency limit shared by all clones of the limiter
pub struct ZenrowsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    limiter: Option<ConcurrencyLimiter>,
    max_retries: u32,
    retry_wait: Duration,
    retry_max_wait: Duration,
}

impl ZenrowsClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent())
            .build()
            .map_err(ZenrowsError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
            limiter: config
                .max_concurrent_requests
                .filter(|&max| max > 0)
                .map(ConcurrencyLimiter::new),
            max_retries: config.max_retries,
            retry_wait: config.retry_wait,
            retry_max_wait: config.retry_max_wait,
        })
    }

    /// Whether both a base URL and an API key are set
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    /// Send a request to the API endpoint, retrying transient failures
    ///
    /// # Arguments
    /// * `method` - HTTP method forwarded to the target
    /// * `query` - Query parameters besides `apikey`
    /// * `headers` - Extra request headers
    /// * `body` - Request body forwarded to the target
    ///
    /// # Returns
    /// The response of the last attempt. A retryable status that is still
    /// failing after all retries is returned as a normal response so the
    /// caller can inspect its problem payload.
    ///
    /// # Errors
    /// - `HttpError` - Network errors that persisted through all retries
    pub async fn execute(
        &self,
        method: Method,
        query: &[(String, String)],
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<Response> {
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await,
            None => None,
        };

        let mut attempt = 0;
        loop {
            debug!(%method, attempt, "sending scraper api request");

            match self.send_once(&method, query, &headers, body.as_deref()).await {
                Ok(response) => {
                    let status = response.status();
                    if !Self::is_retryable_status(status) || attempt >= self.max_retries {
                        return Ok(response);
                    }
                    let delay = self.backoff(attempt);
                    warn!(
                        status = status.as_u16(),
                        ?delay,
                        attempt,
                        "retrying scraper api request"
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    if !e.is_retryable() || attempt >= self.max_retries {
                        return Err(e);
                    }
                    let delay = self.backoff(attempt);
                    warn!(error = %e, ?delay, attempt, "retrying scraper api request");
                    sleep(delay).await;
                }
            }

            attempt += 1;
        }
    }

    /// Perform a single attempt and read the whole body
    async fn send_once(
        &self,
        method: &Method,
        query: &[(String, String)],
        headers: &HeaderMap,
        body: Option<&str>,
    ) -> Result<Response> {
        let endpoint = format!("{}/", self.base_url.trim_end_matches('/'));
        let mut request = self
            .client
            .request(method.clone(), endpoint)
            .query(&[(keys::API_KEY, self.api_key.as_str())])
            .query(query)
            .headers(headers.clone());

        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let started = Instant::now();
        let response = request.send().await.map_err(ZenrowsError::HttpError)?;
        Response::read(response, started).await
    }

    /// Delay before retry number `attempt` (0-based)
    ///
    /// Doubles from `retry_wait` and never exceeds `retry_max_wait`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.retry_wait
            .saturating_mul(factor)
            .min(self.retry_max_wait)
    }

    /// Check if a response status should be retried
    pub fn is_retryable_status(status: StatusCode) -> bool {
        RETRYABLE_STATUS_CODES.contains(&status)
    }

    /// Get the concurrency limiter, if one is configured
    pub fn limiter(&self) -> Option<&ConcurrencyLimiter> {
        self.limiter.as_ref()
    }
}
