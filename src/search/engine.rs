//! Search engine: score, filter and rank guides.
//!
//! # Scoring
//!
//! A guide's score is the best of its title score and its summary score. A
//! field is scored with [`similarity`] against the whole query. With word
//! matching enabled, every run of consecutive field words as long as the
//! query (in words) is compared too, and a close run (above
//! [`WORD_MATCH_MIN`]) replaces the whole-field score when it is higher.
//! Word matching is what lets a short query like `tire` find a long title
//! like "How to Change a Flat Tire": against the full title it only reaches
//! 0.16.
//!
//! # Ranking
//!
//! Guides scoring strictly above the threshold are kept and sorted by score,
//! best first. The sort is stable so guides with equal scores keep their
//! corpus order.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use crate::matching::similarity;
use crate::models::GuideItem;

/// Default minimum score for a guide to count as a match.
///
/// 0.3 tolerates typos; 0.5 is balanced; 0.8 is strict.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// A run of words must score above this to count as a word match.
///
/// Keeps short words like "to" from loosely matching short queries.
pub const WORD_MATCH_MIN: f64 = 0.6;

/// Tunables for [`SearchEngine`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Guides must score strictly above this value
    pub threshold: f64,
    /// Also score runs of words inside a field, not just the whole field
    pub word_matching: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, word_matching: true }
    }
}

/// A matched guide with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGuide {
    pub guide: GuideItem,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Score a single guide against a query.
    pub fn score(&self, guide: &GuideItem, query: &str) -> f64 {
        self.score_prepared(guide, &PreparedQuery::new(query))
    }

    fn score_prepared(&self, guide: &GuideItem, query: &PreparedQuery) -> f64 {
        self.field_score(&guide.title, query).max(self.field_score(&guide.summary, query))
    }

    fn field_score(&self, field: &str, query: &PreparedQuery) -> f64 {
        let whole = similarity(field, query.text);
        if !self.config.word_matching || query.words.is_empty() {
            return whole;
        }

        let field_words: Vec<&str> = split_words(field).collect();
        field_words
            .windows(query.words.len())
            .map(|run| similarity(&run.join(" "), &query.joined))
            .filter(|&score| score > WORD_MATCH_MIN)
            .fold(whole, f64::max)
    }

    /// Rank `corpus` against `query`, keeping scores.
    ///
    /// Returns an empty list for a blank query without scoring anything.
    pub fn rank(&self, query: &str, corpus: &[GuideItem]) -> Vec<ScoredGuide> {
        let prepared = PreparedQuery::new(query);
        if prepared.text.is_empty() {
            return Vec::new();
        }

        // par_iter().collect() preserves corpus order
        let mut matches: Vec<ScoredGuide> = corpus
            .par_iter()
            .filter_map(|guide| {
                let score = self.score_prepared(guide, &prepared);
                (score > self.config.threshold)
                    .then(|| ScoredGuide { guide: guide.clone(), score })
            })
            .collect();

        // Vec::sort_by is stable: equal scores keep corpus order
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            query = prepared.text,
            corpus = corpus.len(),
            matched = matches.len(),
            threshold = self.config.threshold,
            "ranked corpus"
        );

        matches
    }

    /// Matching guides, best first.
    pub fn search(&self, query: &str, corpus: &[GuideItem]) -> Vec<GuideItem> {
        self.rank(query, corpus).into_iter().map(|m| m.guide).collect()
    }
}

/// A trimmed query and its words, computed once per search
struct PreparedQuery<'a> {
    text: &'a str,
    words: Vec<&'a str>,
    joined: String,
}

impl<'a> PreparedQuery<'a> {
    fn new(query: &'a str) -> Self {
        let text = query.trim();
        let words: Vec<&str> = split_words(text).collect();
        let joined = words.join(" ");
        Self { text, words, joined }
    }
}

fn split_words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric()).filter(|word| !word.is_empty())
}
