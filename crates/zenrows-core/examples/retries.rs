//! Retry failed scrapes with exponential backoff
//!
//! Run with:
//! ZENROWS_API_KEY=... RUST_LOG=zenrows_core=debug cargo run --example retries -p zenrows-core

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use zenrows_core::{ClientConfig, ParameterSet, ZenrowsScraper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Up to 3 retries, waiting 5s, 10s, then 20s
    let config = ClientConfig::default()
        .with_max_retries(3)
        .with_retry_wait(Duration::from_secs(5))
        .with_retry_max_wait(Duration::from_secs(30));
    let scraper = ZenrowsScraper::with_config(config)?;

    let params = ParameterSet::new()
        .with_js_render()
        .with_premium_proxies()
        .with_proxy_country("us");

    let response = scraper
        .get("https://httpbin.io/status/500", Some(&params))
        .await?;

    if let Some(problem) = response.problem() {
        println!("Scrape failed with status {}", response.status_code());
        println!("{}", problem);
        if let Some(code) = problem.code {
            println!("Error code: {}", code);
        }
        return Ok(());
    }

    println!("Status: {}", response.status_code());
    println!("{}", response.text());

    Ok(())
}
