//! History persistence backends: load/save with atomic writes

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::models::SearchHistoryEntry;
use crate::utils::validate_file_size;

pub const HISTORY_FILENAME: &str = "search-history.json";

/// Durable storage for the history sequence.
///
/// `load` never fails: missing or unreadable state is reported as `None`.
pub trait HistoryPersistence: Send + Sync {
    fn load(&self) -> Option<Vec<SearchHistoryEntry>>;
    fn save(&self, entries: &[SearchHistoryEntry]) -> Result<()>;
}

/// Stores history as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persistence at `<data_dir>/search-history.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HISTORY_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<SearchHistoryEntry>> {
        let file = fs::File::open(&self.path)
            .with_context(|| format!("Failed to open history file: {}", self.path.display()))?;
        validate_file_size(&file, &self.path)?;
        let entries = serde_json::from_reader(std::io::BufReader::new(file))
            .context("Failed to parse history JSON")?;
        Ok(entries)
    }
}

impl HistoryPersistence for JsonFilePersistence {
    fn load(&self) -> Option<Vec<SearchHistoryEntry>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no history file");
            return None;
        }

        match self.read() {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable history: {:#}", e);
                None
            }
        }
    }

    fn save(&self, entries: &[SearchHistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create history directory")?;
        }

        // Write atomically (temp file + rename)
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| HISTORY_FILENAME.to_string());
        let temp_path = self.path.with_file_name(format!("{}.tmp", file_name));
        let json = serde_json::to_string_pretty(entries).context("Failed to serialize history")?;
        fs::write(&temp_path, json).context("Failed to write history temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename history temp file")?;

        debug!(path = %self.path.display(), entries = entries.len(), "saved history");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: Option<Vec<SearchHistoryEntry>>,
    fail_saves: bool,
    saves: usize,
}

/// In-process backend; clones share the same storage.
///
/// Lets several stores be built over one backend, and can be told to fail
/// saves to exercise the store's in-memory fallback.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `entries`
    pub fn with_entries(entries: Vec<SearchHistoryEntry>) -> Self {
        let persistence = Self::new();
        persistence.state.lock().entries = Some(entries);
        persistence
    }

    /// Make every following `save` fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.state.lock().fail_saves = fail;
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.state.lock().saves
    }

    /// Last successfully saved sequence
    pub fn stored(&self) -> Option<Vec<SearchHistoryEntry>> {
        self.state.lock().entries.clone()
    }
}

impl HistoryPersistence for MemoryPersistence {
    fn load(&self) -> Option<Vec<SearchHistoryEntry>> {
        self.state.lock().entries.clone()
    }

    fn save(&self, entries: &[SearchHistoryEntry]) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_saves {
            bail!("simulated history save failure");
        }
        state.entries = Some(entries.to_vec());
        state.saves += 1;
        Ok(())
    }
}
