//! Most-recent-first search history with a single-writer lock.
//!
//! # Invariants
//!
//! - At most [`MAX_HISTORY`] entries, newest first
//! - No two entries share a query once trimmed and lowercased
//! - Blank queries are never recorded
//!
//! # Persistence
//!
//! Every mutation writes the full sequence to the backend while still holding
//! the lock, so a mutation and its write complete before the next mutation
//! starts. A failed write is logged and otherwise ignored: the in-memory
//! sequence stays authoritative for the running process.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::persistence::HistoryPersistence;
use crate::models::{SearchHistoryEntry, normalize_query};

/// Maximum number of remembered searches
pub const MAX_HISTORY: usize = 20;

pub struct HistoryStore {
    entries: Mutex<Vec<SearchHistoryEntry>>,
    persistence: Arc<dyn HistoryPersistence>,
}

impl HistoryStore {
    /// Load history from `persistence`.
    ///
    /// Missing or malformed state starts an empty history. Loaded entries are
    /// normalized so a hand-edited file cannot break the invariants.
    pub fn new(persistence: Arc<dyn HistoryPersistence>) -> Self {
        let loaded = persistence.load().unwrap_or_default();
        let entries = normalize_loaded(loaded);
        debug!(entries = entries.len(), "loaded search history");
        Self { entries: Mutex::new(entries), persistence }
    }

    /// Snapshot of the history, newest first
    pub fn entries(&self) -> Vec<SearchHistoryEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Record a search.
    ///
    /// Re-adding a known query (ignoring case) moves it to the front with a
    /// fresh timestamp and the casing just typed.
    pub fn add_search(&self, query: &str) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return;
        }

        let key = normalize_query(trimmed);
        let mut entries = self.entries.lock();
        entries.retain(|e| e.dedup_key() != key);
        entries.insert(0, SearchHistoryEntry::new(trimmed));
        entries.truncate(MAX_HISTORY);
        self.persist(&entries);
    }

    /// Remove the entries at the given 0-based positions.
    ///
    /// Positions past the end are ignored. Returns how many entries were
    /// removed.
    pub fn delete_items(&self, positions: &[usize]) -> usize {
        let mut entries = self.entries.lock();
        let targets: BTreeSet<usize> =
            positions.iter().copied().filter(|&p| p < entries.len()).collect();
        if targets.len() < positions.len() {
            debug!(requested = ?positions, len = entries.len(), "ignoring out-of-range positions");
        }

        // Remove from the back so earlier positions stay valid
        for &position in targets.iter().rev() {
            entries.remove(position);
        }
        self.persist(&entries);
        targets.len()
    }

    pub fn clear_history(&self) {
        let mut entries = self.entries.lock();
        entries.clear();
        self.persist(&entries);
    }

    fn persist(&self, entries: &[SearchHistoryEntry]) {
        if let Err(e) = self.persistence.save(entries) {
            warn!("failed to save search history, keeping it in memory only: {:#}", e);
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore").field("entries", &*self.entries.lock()).finish()
    }
}

/// Drop blank and duplicate queries (first occurrence wins) and cap the length
fn normalize_loaded(loaded: Vec<SearchHistoryEntry>) -> Vec<SearchHistoryEntry> {
    let original_len = loaded.len();
    let mut seen = HashSet::new();
    let mut entries: Vec<SearchHistoryEntry> = loaded
        .into_iter()
        .filter(|e| !e.query.trim().is_empty() && seen.insert(e.dedup_key()))
        .collect();
    entries.truncate(MAX_HISTORY);

    if entries.len() != original_len {
        warn!(
            loaded = original_len,
            kept = entries.len(),
            "dropped blank, duplicate or excess history entries"
        );
    }
    entries
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::history::MemoryPersistence;

    fn store_with(persistence: &MemoryPersistence) -> HistoryStore {
        HistoryStore::new(Arc::new(persistence.clone()))
    }

    fn queries(store: &HistoryStore) -> Vec<String> {
        store.entries().into_iter().map(|e| e.query).collect()
    }

    #[test]
    fn test_add_search() {
        let store = store_with(&MemoryPersistence::new());
        store.add_search("test query");
        assert_eq!(queries(&store), vec!["test query"]);
    }

    #[test]
    fn test_add_search_trims_whitespace() {
        let store = store_with(&MemoryPersistence::new());
        store.add_search("  cook pasta \t");
        assert_eq!(queries(&store), vec!["cook pasta"]);
    }

    #[test]
    fn test_blank_search_is_ignored_and_not_persisted() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);
        store.add_search("");
        store.add_search("   ");
        assert!(store.is_empty());
        assert_eq!(persistence.save_count(), 0);
    }

    #[test]
    fn test_readding_moves_to_front_with_new_casing() {
        let store = store_with(&MemoryPersistence::new());
        store.add_search("Pasta");
        store.add_search("tire");
        let before = store.entries()[1].timestamp;
        store.add_search("pasta");

        let entries = store.entries();
        assert_eq!(queries(&store), vec!["pasta", "tire"]);
        assert!(entries[0].timestamp >= before);
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let store = store_with(&MemoryPersistence::new());
        store.add_search("Pasta");
        let first_id = store.entries()[0].id;
        store.add_search("PASTA");
        assert_eq!(store.len(), 1);
        assert_ne!(store.entries()[0].id, first_id);
    }

    #[test]
    fn test_order_newest_first() {
        let store = store_with(&MemoryPersistence::new());
        for q in ["first", "second", "third"] {
            store.add_search(q);
        }
        assert_eq!(queries(&store), vec!["third", "second", "first"]);
    }

    #[test]
    fn test_capped_at_max_history() {
        let store = store_with(&MemoryPersistence::new());
        for i in 1..=25 {
            store.add_search(&format!("q{i}"));
        }
        let q = queries(&store);
        assert_eq!(q.len(), MAX_HISTORY);
        assert_eq!(q.first().map(String::as_str), Some("q25"));
        assert_eq!(q.last().map(String::as_str), Some("q6"));
    }

    #[test]
    fn test_delete_items() {
        let store = store_with(&MemoryPersistence::new());
        for q in ["a", "b", "c", "d"] {
            store.add_search(q);
        }
        // d c b a
        let removed = store.delete_items(&[0, 2]);
        assert_eq!(removed, 2);
        assert_eq!(queries(&store), vec!["c", "a"]);
    }

    #[test]
    fn test_delete_ignores_out_of_range_and_repeats() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);
        store.add_search("a");
        store.add_search("b");
        let removed = store.delete_items(&[1, 1, 7, 99]);
        assert_eq!(removed, 1);
        assert_eq!(queries(&store), vec!["b"]);
        assert_eq!(persistence.stored().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_history_persists_empty() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);
        store.add_search("test 1");
        store.add_search("test 2");
        store.clear_history();
        assert!(store.is_empty());
        assert_eq!(persistence.stored(), Some(vec![]));
        assert!(store_with(&persistence).is_empty());
    }

    #[test]
    fn test_every_mutation_saves_once() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);
        store.add_search("a");
        store.add_search("b");
        store.delete_items(&[0]);
        store.clear_history();
        assert_eq!(persistence.save_count(), 4);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let persistence = MemoryPersistence::new();
        let store = store_with(&persistence);
        persistence.set_fail_saves(true);
        store.add_search("offline");
        assert_eq!(queries(&store), vec!["offline"]);
        assert!(persistence.stored().is_none());
    }

    #[test]
    fn test_load_normalizes_entries() {
        let mut loaded = vec![
            SearchHistoryEntry::new("Pasta"),
            SearchHistoryEntry::new("pasta "),
            SearchHistoryEntry::new("   "),
        ];
        loaded.extend((0..30).map(|i| SearchHistoryEntry::new(format!("extra {i}"))));
        let store = store_with(&MemoryPersistence::with_entries(loaded));

        let q = queries(&store);
        assert_eq!(q.len(), MAX_HISTORY);
        assert_eq!(q[0], "Pasta");
        assert_eq!(q[1], "extra 0");
    }

    #[test]
    fn test_concurrent_adds_keep_invariants() {
        let persistence = MemoryPersistence::new();
        let store = Arc::new(store_with(&persistence));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..10 {
                        store.add_search(&format!("query {}", (t * 10 + i) % 15));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entries = store.entries();
        let keys: HashSet<String> = entries.iter().map(|e| e.dedup_key()).collect();
        assert_eq!(keys.len(), entries.len());
        assert!(entries.len() <= MAX_HISTORY);
        assert_eq!(persistence.stored(), Some(entries));
        assert_eq!(persistence.save_count(), 80);
    }
}
