use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{error::AppError, models::MediaType};

/// Search hit merged with its resolved detail record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MediaRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub description: Option<String>,
    pub preview: Option<String>,
    pub caption: Option<String>,
    /// Detail payload, passed through verbatim
    pub collection: Value,
}

/// Detail resolution failure captured for one item
#[derive(Debug)]
pub struct ItemFailure {
    pub id: String,
    pub position: usize,
    pub error: AppError,
}

/// Per-item result of an aggregation run
#[derive(Debug)]
pub enum ItemOutcome {
    Resolved(MediaRecord),
    Failed(ItemFailure),
}

impl ItemOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ItemOutcome::Resolved(_))
    }

    pub fn id(&self) -> &str {
        match self {
            ItemOutcome::Resolved(record) => &record.id,
            ItemOutcome::Failed(failure) => &failure.id,
        }
    }

    pub fn record(&self) -> Option<&MediaRecord> {
        match self {
            ItemOutcome::Resolved(record) => Some(record),
            ItemOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            ItemOutcome::Resolved(_) => None,
            ItemOutcome::Failed(failure) => Some(&failure.error),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OutcomeView<'a> {
    Resolved(&'a MediaRecord),
    Failed {
        id: &'a str,
        position: usize,
        error: String,
    },
}

impl Serialize for ItemOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view = match self {
            ItemOutcome::Resolved(record) => OutcomeView::Resolved(record),
            ItemOutcome::Failed(failure) => OutcomeView::Failed {
                id: &failure.id,
                position: failure.position,
                error: failure.error.to_string(),
            },
        };
        view.serialize(serializer)
    }
}
