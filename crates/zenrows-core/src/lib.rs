//! ZenRows Scraper API Client
//!
//! Provides an async client for the ZenRows Scraper API together with the
//! typed scraping parameters it accepts.
//!
//! # Overview
//!
//! This crate provides:
//! - [`ParameterSet`], the scraping directives (proxies, JavaScript
//!   rendering, screenshots, output extraction, resource blocking, sessions)
//! - Local validation of the service's cross-field rules before a request
//!   is billed
//! - Encoding of parameters into query parameters and decoding them back
//! - An HTTP client with retries, backoff and an optional concurrency cap
//!
//! # Example
//!
//! ```no_run
//! use zenrows_core::{ClientConfig, OutputType, ParameterSet, Result, ZenrowsScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = ZenrowsScraper::with_config(
//!         ClientConfig::new("YOUR_API_KEY").with_max_retries(3),
//!     )?;
//!
//!     let params = ParameterSet::new()
//!         .with_js_render()
//!         .with_outputs([OutputType::Emails, OutputType::Links]);
//!
//!     let response = scraper.get("https://httpbin.io/anything", Some(&params)).await?;
//!     if let Some(err) = response.error() {
//!         eprintln!("scrape failed: {}", err);
//!     } else {
//!         println!("{}", response.text());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Parameters without a client
//!
//! Validation and the query codec are plain synchronous functions and can
//! be used on their own, e.g. to check parameters received by a proxy:
//!
//! ```
//! use zenrows_core::ParameterSet;
//!
//! let params = ParameterSet::from_query_str("js_render=true&wait=2000").unwrap();
//! assert!(params.validate().is_ok());
//! assert_eq!(params.to_query_string(), "js_render=true&wait=2000");
//! ```

mod client;
mod codec;
mod error;
mod params;
mod problem;
mod response;
mod scraper;
mod types;
pub mod url;
mod validate;
mod version;

// Re-export client types
pub use client::{
    API_KEY_ENV, ClientConfig, ConcurrencyLimiter, DEFAULT_BASE_URL, RETRYABLE_STATUS_CODES,
    ZenrowsClient,
};

// Re-export error types
pub use error::{Result, ZenrowsError};

// Re-export parameter model
pub use params::{ParameterSet, keys};
pub use types::{OutputType, ResourceType, ResponseType, ScreenshotFormat};

// Re-export response types
pub use problem::{PROBLEM_CONTENT_TYPE, Problem};
pub use response::{Response, TargetCookie};

// Re-export main scraper API
pub use scraper::ZenrowsScraper;

pub use version::{VERSION, user_agent};

pub use reqwest::Method;
