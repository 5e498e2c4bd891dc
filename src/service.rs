//! Application facade tying the catalog, search engine and history together.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::GuideCatalogProvider;
use crate::history::HistoryStore;
use crate::models::{GuideItem, normalize_query};
use crate::search::{ScoredGuide, SearchEngine};

pub struct GuideService {
    catalog: Arc<dyn GuideCatalogProvider>,
    engine: SearchEngine,
    history: Arc<HistoryStore>,
}

impl GuideService {
    pub fn new(
        catalog: Arc<dyn GuideCatalogProvider>,
        engine: SearchEngine,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self { catalog, engine, history }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn featured(&self) -> Result<Vec<GuideItem>> {
        self.catalog.fetch_featured().context("Failed to load featured guides")
    }

    pub fn all_guides(&self) -> Result<Vec<GuideItem>> {
        self.catalog.fetch_all().context("Failed to load guide catalog")
    }

    /// Rank the catalog against `query` and record the query in history.
    ///
    /// Blank queries return no results and are not recorded. If the catalog
    /// cannot be loaded the error is returned and history is left untouched.
    pub fn search(&self, query: &str) -> Result<Vec<ScoredGuide>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let corpus = self.all_guides()?;
        let results = self.engine.rank(query, &corpus);
        self.history.add_search(query);

        info!(query = query.trim(), results = results.len(), "search completed");
        Ok(results)
    }

    /// Find one guide by 1-based position in the full catalog, or else by the
    /// best fuzzy title match.
    ///
    /// Looking a guide up does not touch history.
    pub fn find_guide(&self, selector: &str) -> Result<Option<GuideItem>> {
        let corpus = self.all_guides()?;
        let selector = selector.trim();

        if let Ok(position) = selector.parse::<usize>() {
            return Ok(position.checked_sub(1).and_then(|idx| corpus.get(idx)).cloned());
        }

        let wanted = normalize_query(selector);
        if let Some(exact) = corpus.iter().find(|g| normalize_query(&g.title) == wanted) {
            return Ok(Some(exact.clone()));
        }

        Ok(self.engine.search(selector, &corpus).into_iter().next())
    }
}
