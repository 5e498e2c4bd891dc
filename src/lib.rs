//! How-to guides - fuzzy search over a curated guide catalog
//!
//! This library provides the search core behind the `howto-guides` CLI:
//!
//! - Levenshtein edit distance and a normalized similarity score
//! - A search engine that filters and ranks guides against a free-text query
//! - A bounded, deduplicated, persisted history of past searches
//! - Guide catalogs (builtin or JSON file) and a thin client for the remote
//!   "ask a question" backend
//!
//! Components are constructed explicitly and passed to whatever needs them.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use howto_guides::{BuiltinCatalog, GuideCatalogProvider, HistoryStore, MemoryPersistence, SearchEngine};
//!
//! let corpus = BuiltinCatalog::new().fetch_all()?;
//! let results = SearchEngine::default().search("flat tire", &corpus);
//! assert_eq!(results[0].title, "How to Change a Flat Tire");
//!
//! let history = HistoryStore::new(Arc::new(MemoryPersistence::new()));
//! history.add_search("flat tire");
//! assert_eq!(history.entries()[0].query, "flat tire");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ask;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod history;
pub mod logging;
pub mod matching;
pub mod models;
pub mod search;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use ask::{Answer, AskClient, AskError, HttpAskClient};
pub use catalog::{BuiltinCatalog, FEATURED_COUNT, FileCatalog, GuideCatalogProvider};
pub use config::Config;
pub use history::{HistoryPersistence, HistoryStore, JsonFilePersistence, MAX_HISTORY, MemoryPersistence};
pub use matching::{distance, similarity};
pub use models::{GuideItem, SearchHistoryEntry};
pub use search::{DEFAULT_THRESHOLD, ScoredGuide, SearchConfig, SearchEngine};
pub use service::GuideService;
