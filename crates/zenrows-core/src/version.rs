//! SDK version reported to the ZenRows Scraper API

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent with every API request
pub fn user_agent() -> String {
    format!("zenrows-rust/{}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_semver() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u64>().is_ok()));
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(), format!("zenrows-rust/{}", VERSION));
    }
}
