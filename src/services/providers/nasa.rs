/// NASA Image and Video Library transport
///
/// API Flow:
/// 1. Search: GET {api_url}/search?q=...&media_type=... → `collection.items[]`
/// 2. Detail: GET each item's `href` → collection manifest (list of asset URLs)
///
/// Both calls share one reqwest client, so concurrent detail fetches reuse the
/// same connection pool.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::MediaTransport,
};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Default NASA Image and Video Library API root
pub const NASA_API_URL: &str = "https://images-api.nasa.gov";
/// Default search endpoint path
pub const SEARCH_ENDPOINT: &str = "search";

#[derive(Clone)]
pub struct NasaImagesClient {
    http_client: HttpClient,
}

impl NasaImagesClient {
    /// Creates a client with the configured user agent and timeout
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = HttpClient::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    /// Wraps an existing reqwest client
    pub fn with_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Sends a request and parses a JSON body, mapping failures to transport errors
    async fn get_json(&self, request: RequestBuilder, url: &str) -> AppResult<Value> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "NASA API returned status {} for {}: {}",
                status, url, body
            )));
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                "Failed to deserialize NASA API response"
            );
            AppError::ExternalApi(format!("Failed to parse NASA API response from {}: {}", url, e))
        })
    }
}

#[async_trait::async_trait]
impl MediaTransport for NasaImagesClient {
    async fn search_primary(
        &self,
        base_url: &str,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> AppResult<Value> {
        let url = join_url(base_url, endpoint);
        tracing::debug!(url = %url, params = ?params, "Sending search request");

        let request = self.http_client.get(&url).query(params);
        self.get_json(request, &url).await
    }

    async fn fetch_detail(&self, uri: &str) -> AppResult<Value> {
        let request = self.http_client.get(uri);
        self.get_json(request, uri).await
    }
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
