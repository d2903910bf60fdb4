use serde::Deserialize;

use crate::services::providers::nasa::{NASA_API_URL, SEARCH_ENDPOINT};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// NASA Image and Video Library API base URL
    #[serde(default = "default_nasa_api_url")]
    pub nasa_api_url: String,

    /// Path of the search endpoint, relative to the base URL
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// User-Agent header sent with every outbound request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout applied by the HTTP client (none when unset)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Upper bound on simultaneous detail fetches (unbounded when unset)
    #[serde(default)]
    pub max_concurrent_fetches: Option<usize>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_nasa_api_url() -> String {
    NASA_API_URL.to_string()
}

fn default_search_endpoint() -> String {
    SEARCH_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:104.0) Gecko/20100101 Firefox/104.0".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nasa_api_url: default_nasa_api_url(),
            search_endpoint: default_search_endpoint(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
            max_concurrent_fetches: None,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
