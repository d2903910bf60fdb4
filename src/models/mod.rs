use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod item;
pub mod outcome;
pub mod query;

pub use item::{parse_items, ResultItem};
pub use outcome::{ItemFailure, ItemOutcome, MediaRecord};
pub use query::{SearchFilters, SearchQuery};

/// Kind of media an item represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(format!("unsupported media type '{}'", other)),
        }
    }
}

// ============================================================================
// NASA Image and Video Library API Types
// ============================================================================

/// One element of `collection.items` in a search response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiItem {
    pub href: String,
    #[serde(default)]
    pub data: Vec<ApiItemData>,
    #[serde(default)]
    pub links: Option<Vec<ApiLink>>,
}

/// Descriptive metadata block of a search hit
#[derive(Debug, Clone, Deserialize)]
pub struct ApiItemData {
    pub nasa_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub media_type: String,
}

/// Auxiliary link attached to a search hit (preview thumbnail, captions file, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiLink {
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}
