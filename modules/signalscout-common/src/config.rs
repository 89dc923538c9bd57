use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Alternate news feed. Optional: absence disables only that feed.
    pub newsdata_api_key: Option<String>,

    // Web server
    pub api_host: String,
    pub api_port: u16,

    // Discovery output page size
    pub page_size: usize,

    // Provider cache TTL
    pub cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if a var is present but malformed.
    pub fn from_env() -> Self {
        Self {
            newsdata_api_key: env::var("NEWSDATA_API_KEY").ok().filter(|k| !k.is_empty()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("API_PORT must be a number"),
            page_size: env::var("DISCOVERY_PAGE_SIZE")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .expect("DISCOVERY_PAGE_SIZE must be a number"),
            cache_ttl: Duration::from_secs(
                env::var("CACHE_TTL_MINUTES")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .expect("CACHE_TTL_MINUTES must be a number")
                    * 60,
            ),
        }
    }
}
