/// Media search transport abstraction
///
/// The aggregation core never talks HTTP directly. It issues the primary search
/// call and the per-item detail calls through a `MediaTransport`, which owns the
/// shared connection pool and any timeout policy.
use serde_json::Value;

use crate::error::AppResult;

pub mod nasa;

pub use nasa::NasaImagesClient;

/// Trait for media search transports
///
/// Implementations must be callable concurrently from many tasks at once without
/// external synchronization. Failures (network, non-2xx status, malformed body)
/// are returned to the caller, never swallowed.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaTransport: Send + Sync {
    /// GET `{base_url}/{endpoint}` with the given query parameters
    async fn search_primary(
        &self,
        base_url: &str,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> AppResult<Value>;

    /// GET an absolute URI
    async fn fetch_detail(&self, uri: &str) -> AppResult<Value>;
}
