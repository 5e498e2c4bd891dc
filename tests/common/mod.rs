//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use howto_guides::{FEATURED_COUNT, GuideItem};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for guide fixtures
pub struct GuideBuilder {
    title: String,
    summary: String,
    steps: Vec<String>,
    source_url: Option<String>,
}

impl GuideBuilder {
    /// Create a guide with default values
    pub fn new() -> Self {
        Self {
            title: "How to Test".to_string(),
            summary: "Write the test first.".to_string(),
            steps: vec!["Write a failing test.".to_string(), "Make it pass.".to_string()],
            source_url: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn source_url(mut self, url: &str) -> Self {
        self.source_url = Some(url.to_string());
        self
    }

    pub fn build(&self) -> GuideItem {
        GuideItem::new(&self.title, &self.summary, self.steps.clone(), self.source_url.clone())
    }

    /// JSON object as found in a catalog file (no id)
    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "title": self.title,
            "summary": self.summary,
            "steps": self.steps,
        });
        if let Some(url) = &self.source_url {
            value["sourceURL"] = json!(url);
        }
        value
    }
}

impl Default for GuideBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn espresso() -> GuideItem {
    GuideBuilder::new()
        .title("How to Brew an Espresso")
        .summary("Fast, balanced shot using a home machine.")
        .source_url("https://en.wikipedia.org/wiki/Espresso")
        .build()
}

pub fn flat_tire() -> GuideItem {
    GuideBuilder::new()
        .title("How to Change a Flat Tire")
        .summary("Safe roadside swap in under 15 minutes.")
        .build()
}

/// A full featured section: `lead` followed by filler guides
pub fn featured_with(lead: GuideBuilder) -> Vec<GuideBuilder> {
    let mut featured = vec![lead];
    featured.extend((2..=FEATURED_COUNT).map(|i| {
        GuideBuilder::new().title(&format!("Placeholder guide {i}")).summary("Nothing to see here.")
    }));
    featured
}

/// Temporary data directory for history files and catalogs
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn history_path(&self) -> PathBuf {
        self.temp_dir.path().join("search-history.json")
    }

    /// Write raw content to the history file
    pub fn with_history(self, content: &str) -> Self {
        fs::write(self.history_path(), content).expect("Failed to write history file");
        self
    }

    /// Write a catalog file with the given sections
    pub fn with_catalog(self, featured: &[GuideBuilder], additional: &[GuideBuilder]) -> Self {
        let document = json!({
            "featured": featured.iter().map(GuideBuilder::to_json).collect::<Vec<_>>(),
            "additional": additional.iter().map(GuideBuilder::to_json).collect::<Vec<_>>(),
        });
        let content = serde_json::to_string_pretty(&document).expect("Failed to encode catalog");
        fs::write(self.catalog_path(), content).expect("Failed to write catalog file");
        self
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.temp_dir.path().join("catalog.json")
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}
