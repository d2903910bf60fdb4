use std::sync::Arc;

use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        parse_items, ItemFailure, ItemOutcome, MediaRecord, MediaType, ResultItem, SearchQuery,
    },
    services::providers::{nasa::SEARCH_ENDPOINT, MediaTransport},
};

/// Search-and-resolve orchestration over a [`MediaTransport`]
///
/// A run issues one primary search call, then resolves every hit's detail record
/// concurrently. Per-item failures are captured as [`ItemOutcome::Failed`] at that
/// item's position; they never cancel sibling fetches or fail the run.
#[derive(Clone)]
pub struct MediaSearchService {
    transport: Arc<dyn MediaTransport>,
    base_url: String,
    endpoint: String,
    max_concurrency: Option<usize>,
}

impl MediaSearchService {
    pub fn new(transport: Arc<dyn MediaTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            endpoint: SEARCH_ENDPOINT.to_string(),
            max_concurrency: None,
        }
    }

    pub fn from_config(transport: Arc<dyn MediaTransport>, config: &Config) -> Self {
        Self::new(transport, config.nasa_api_url.clone())
            .with_endpoint(config.search_endpoint.clone())
            .with_max_concurrency(config.max_concurrent_fetches)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Bounds the number of detail fetches in flight; `None` means unbounded
    ///
    /// The limit is clamped to `1..=Semaphore::MAX_PERMITS`.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.map(|n| n.clamp(1, Semaphore::MAX_PERMITS));
        self
    }

    /// Searches one media type (or one comma-separated media type filter) for `query`
    ///
    /// Returns one outcome per hit, in the order the API listed them.
    pub async fn search(&self, query: &str, media_type: &str) -> AppResult<Vec<ItemOutcome>> {
        let query = SearchQuery::text(query, media_type)?;
        self.search_query(query).await
    }

    /// Searches each media type with its own primary call and concatenates the outcomes
    ///
    /// Types are searched in the given order; repeated types are searched once.
    pub async fn search_media_types(
        &self,
        query: &str,
        media_types: &[MediaType],
    ) -> AppResult<Vec<ItemOutcome>> {
        if media_types.is_empty() {
            return Err(AppError::Validation(
                "At least one media type must be selected".to_string(),
            ));
        }

        let mut seen = Vec::with_capacity(media_types.len());
        let mut outcomes = Vec::new();

        for media_type in media_types {
            if seen.contains(media_type) {
                continue;
            }
            seen.push(*media_type);
            outcomes.extend(self.search(query, media_type.as_str()).await?);
        }

        Ok(outcomes)
    }

    /// Runs the full flow for a validated query
    pub async fn search_query(&self, query: SearchQuery) -> AppResult<Vec<ItemOutcome>> {
        tracing::info!(params = ?query.params(), "Sending search request");

        let response = self
            .transport
            .search_primary(&self.base_url, &self.endpoint, query.params())
            .await?;

        let items = parse_items(response)?;

        tracing::info!(items = items.len(), "Search response received");

        let outcomes = self.resolve_all(items).await;

        let error_count = outcomes.iter().filter(|o| !o.is_resolved()).count();
        if error_count > 0 {
            tracing::warn!(
                success_count = outcomes.len() - error_count,
                error_count = error_count,
                "Partial collection fetch failure"
            );
        }

        tracing::info!(outcomes = outcomes.len(), "Search completed");

        Ok(outcomes)
    }

    /// Resolves every item concurrently and waits for all of them
    ///
    /// Fetches run in a [`JoinSet`], so dropping the run aborts any still in
    /// flight. Results are slotted back by index to keep positional order.
    async fn resolve_all(&self, items: Vec<ResultItem>) -> Vec<ItemOutcome> {
        let limiter = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let mut tasks = JoinSet::new();
        let mut metas = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            let transport = self.transport.clone();
            let limiter = limiter.clone();
            metas.push((item.id.clone(), item.position));

            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => return (index, Err(AppError::Internal(e.to_string()))),
                    },
                    None => None,
                };
                (index, item.resolve(transport.as_ref()).await)
            });
        }

        let mut slots: Vec<Option<AppResult<MediaRecord>>> =
            (0..metas.len()).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::error!(error = %e, "Task join error"),
            }
        }

        metas
            .into_iter()
            .zip(slots)
            .map(|((id, position), slot)| {
                let result = slot.unwrap_or_else(|| {
                    Err(AppError::Internal(
                        "collection fetch did not complete".to_string(),
                    ))
                });
                match result {
                    Ok(record) => ItemOutcome::Resolved(record),
                    Err(error) => {
                        tracing::warn!(error = %error, position, id = %id, "Collection fetch failed");
                        ItemOutcome::Failed(ItemFailure {
                            id,
                            position,
                            error,
                        })
                    }
                }
            })
            .collect()
    }
}
