use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A past search, as recorded by the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub id: Uuid,
    pub query: String,
    #[serde(deserialize_with = "crate::models::deserializers::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// New entry stamped with the current time
    pub fn new(query: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), query: query.into(), timestamp: Utc::now() }
    }

    /// Key used for case-insensitive deduplication
    pub fn dedup_key(&self) -> String {
        normalize_query(&self.query)
    }
}

/// Trim and lowercase a query for comparison
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
