//! Bounded, deduplicated search history.
//!
//! [`HistoryStore`] keeps the most recent queries newest-first and mirrors
//! every change to a [`HistoryPersistence`] backend:
//!
//! - `search-history.json`: JSON array of entries, written atomically
//!
//! Default location: platform data directory
//! - macOS: `~/Library/Application Support/howto-guides/`
//! - Linux: `~/.local/share/howto-guides/`
//! - Windows: `%APPDATA%\howto-guides\`

pub mod persistence;
pub mod store;

pub use persistence::{HistoryPersistence, JsonFilePersistence, MemoryPersistence};
pub use store::{HistoryStore, MAX_HISTORY};
