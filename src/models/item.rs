use serde_json::Value;
use std::hash::{Hash, Hasher};

use crate::{
    error::{AppError, AppResult},
    models::{ApiItem, ApiLink, MediaRecord, MediaType},
    services::providers::MediaTransport,
};

/// One hit from a primary search response
///
/// Identity is the NASA id: two items with the same `id` are equal and hash
/// the same regardless of their other fields.
#[derive(Debug, Clone)]
pub struct ResultItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub media_type: MediaType,
    /// Detail (collection manifest) URI, from the item's `href`
    pub collection_uri: String,
    pub preview_uri: Option<String>,
    pub captions_uri: Option<String>,
    /// 1-based ordinal within one aggregation run
    pub position: usize,
}

impl ResultItem {
    /// Builds an item from one raw element of `collection.items`
    pub fn from_value(raw: Value, position: usize) -> AppResult<Self> {
        let item: ApiItem = serde_json::from_value(raw).map_err(|e| {
            AppError::MalformedResponse(format!("item {} could not be parsed: {}", position, e))
        })?;
        Self::from_api(item, position)
    }

    pub fn from_api(item: ApiItem, position: usize) -> AppResult<Self> {
        let ApiItem { href, data, links } = item;

        let data = data.into_iter().next().ok_or_else(|| {
            AppError::MalformedResponse(format!("item {} has no data block", position))
        })?;

        let media_type = data.media_type.parse::<MediaType>().map_err(|e| {
            AppError::MalformedResponse(format!("item {} ({}): {}", position, data.nasa_id, e))
        })?;

        let links = links.unwrap_or_default();

        Ok(Self {
            id: data.nasa_id,
            title: data.title,
            description: data.description,
            media_type,
            collection_uri: href,
            preview_uri: first_link(&links, "preview"),
            captions_uri: first_link(&links, "captions"),
            position,
        })
    }

    /// Fetches the detail record and merges it with this item's metadata
    ///
    /// Transport failures are returned as-is; no retries are attempted.
    pub async fn resolve(&self, transport: &dyn MediaTransport) -> AppResult<MediaRecord> {
        tracing::debug!(
            position = self.position,
            id = %self.id,
            uri = %self.collection_uri,
            "Fetching collection"
        );

        let collection = transport.fetch_detail(&self.collection_uri).await?;

        tracing::debug!(position = self.position, id = %self.id, "Collection fetched");

        Ok(MediaRecord {
            id: self.id.clone(),
            media_type: self.media_type,
            title: self.title.clone(),
            description: self.description.clone(),
            preview: self.preview_uri.clone(),
            caption: self.captions_uri.clone(),
            collection,
        })
    }
}

impl PartialEq for ResultItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResultItem {}

impl Hash for ResultItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn first_link(links: &[ApiLink], rel: &str) -> Option<String> {
    links
        .iter()
        .find(|link| link.rel.as_deref() == Some(rel))
        .and_then(|link| link.href.clone())
}

/// Parses `collection.items` of a primary response, numbering items from 1
///
/// Takes the item array out of the response rather than copying it. Any
/// malformed item aborts the whole parse.
pub fn parse_items(mut response: Value) -> AppResult<Vec<ResultItem>> {
    let items = match response.pointer_mut("/collection/items").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(AppError::MalformedResponse(
                "search response has no collection.items array".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let item = ResultItem::from_value(raw, index + 1)?;
            tracing::debug!(position = item.position, id = %item.id, "Item added");
            Ok(item)
        })
        .collect()
}
