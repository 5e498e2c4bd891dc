use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ask::search_url;

/// A curated how-to guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, rename = "sourceURL", alias = "source_url")]
    pub source_url: Option<String>,
}

impl GuideItem {
    /// Create a guide with a fresh identifier
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        steps: Vec<String>,
        source_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            summary: summary.into(),
            steps,
            source_url,
        }
    }

    /// External link for the guide, falling back to a web search for its title
    pub fn link(&self) -> String {
        match &self.source_url {
            Some(url) => url.clone(),
            None => search_url(&self.title),
        }
    }
}
