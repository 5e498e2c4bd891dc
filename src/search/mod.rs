//! Fuzzy ranking of a guide corpus against a free-text query.
//!
//! The engine is pure: it receives an already-fetched corpus and never
//! performs I/O, so it can be shared freely between threads.

pub mod engine;

pub use engine::{DEFAULT_THRESHOLD, ScoredGuide, SearchConfig, SearchEngine, WORD_MATCH_MIN};
