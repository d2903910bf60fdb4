use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::MediaType,
};

/// Media type filter sent when the caller sets none; the API also serves audio
pub const DEFAULT_MEDIA_TYPES: &str = "image,video";

/// Filter parameters accepted by the NASA search endpoint
///
/// Every field is optional. Unset and blank fields are dropped when the
/// filters are turned into a [`SearchQuery`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    pub q: Option<String>,
    pub center: Option<String>,
    pub description: Option<String>,
    pub description_508: Option<String>,
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub media_type: Option<String>,
    pub nasa_id: Option<String>,
    pub page: Option<u32>,
    pub photographer: Option<String>,
    pub secondary_creator: Option<String>,
    pub title: Option<String>,
    pub year_start: Option<String>,
    pub year_end: Option<String>,
}

/// Validated, immutable parameter set for one primary search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    params: Vec<(&'static str, String)>,
}

impl SearchQuery {
    /// Builds a query from filters, rejecting an empty parameter set
    pub fn new(filters: SearchFilters) -> AppResult<Self> {
        let SearchFilters {
            q,
            center,
            description,
            description_508,
            keywords,
            location,
            media_type,
            nasa_id,
            page,
            photographer,
            secondary_creator,
            title,
            year_start,
            year_end,
        } = filters;

        let candidates = [
            ("q", q),
            ("center", center),
            ("description", description),
            ("description_508", description_508),
            ("keywords", keywords),
            ("location", location),
            ("media_type", media_type),
            ("nasa_id", nasa_id),
            ("page", page.map(|p| p.to_string())),
            ("photographer", photographer),
            ("secondary_creator", secondary_creator),
            ("title", title),
            ("year_start", year_start),
            ("year_end", year_end),
        ];

        let params: Vec<(&'static str, String)> = candidates
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value?.trim().to_string();
                (!value.is_empty()).then_some((name, value))
            })
            .collect();

        if params.is_empty() {
            return Err(AppError::Validation(
                "At least one search parameter must be used".to_string(),
            ));
        }

        let mut query = Self { params };
        match query.get("media_type") {
            Some(media_types) => {
                for part in media_types.split(',') {
                    part.parse::<MediaType>().map_err(AppError::Validation)?;
                }
            }
            None => query
                .params
                .push(("media_type", DEFAULT_MEDIA_TYPES.to_string())),
        }

        Ok(query)
    }

    /// Shorthand for the common free-text plus media type search
    pub fn text(query: &str, media_type: &str) -> AppResult<Self> {
        Self::new(SearchFilters {
            q: Some(query.to_string()),
            media_type: Some(media_type.to_string()),
            ..Default::default()
        })
    }

    /// Final parameter mapping in the endpoint's documented field order
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}
