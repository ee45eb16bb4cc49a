//! Scrape a batch of pages while never exceeding the plan's concurrency limit
//!
//! Run with: ZENROWS_API_KEY=... cargo run --example concurrency -p zenrows-core

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use zenrows_core::{ClientConfig, ParameterSet, ZenrowsScraper};

const MAX_CONCURRENT_REQUESTS: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::default().with_max_concurrent_requests(MAX_CONCURRENT_REQUESTS);
    let scraper = Arc::new(ZenrowsScraper::with_config(config)?);

    let mut tasks = Vec::new();
    for i in 1..=10 {
        let scraper = Arc::clone(&scraper);
        let url = format!("https://httpbin.io/anything?page={}", i);
        tasks.push(tokio::spawn(async move {
            let params = ParameterSet::new().with_original_status();
            let result = scraper.get(&url, Some(&params)).await;
            (url, result)
        }));
    }

    for task in tasks {
        let (url, result) = task.await?;
        match result {
            Ok(response) => match response.error() {
                Some(err) => println!("✗ {}: {}", url, err),
                None => println!(
                    "✓ {}: {} ({} bytes in {:?})",
                    url,
                    response.status_code(),
                    response.size(),
                    response.elapsed()
                ),
            },
            Err(e) => println!("✗ {}: {}", url, e),
        }
    }

    Ok(())
}
