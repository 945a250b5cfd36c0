//! User preference record and its persistence
//!
//! Persistence is best-effort: a missing or broken record means defaults,
//! and a failed write is logged and otherwise ignored.

use crate::AppError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 5000;

/// Preferences persisted across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(rename = "autoplayDelay")]
    pub autoplay_delay_ms: u64,
    pub show_counter: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: DEFAULT_AUTOPLAY_DELAY_MS,
            show_counter: true,
        }
    }
}

impl Preferences {
    /// Read from a store, substituting defaults for anything unusable
    pub fn load_or_default(store: &dyn PreferenceStore) -> Self {
        match store.get().and_then(Self::validated) {
            Some(prefs) => prefs,
            None => {
                tracing::info!("No usable preferences stored, using defaults");
                Self::default()
            }
        }
    }

    /// `None` when the record violates `autoplay_delay_ms > 0`
    pub fn validated(self) -> Option<Self> {
        (self.autoplay_delay_ms > 0).then_some(self)
    }

    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms)
    }

    /// Slider label, `"2s"` or `"2.5s"`
    pub fn delay_label(&self) -> String {
        if self.autoplay_delay_ms % 1000 == 0 {
            format!("{}s", self.autoplay_delay_ms / 1000)
        } else {
            format!("{:.1}s", self.autoplay_delay_ms as f64 / 1000.0)
        }
    }
}

/// Key-value store holding the single preference record
pub trait PreferenceStore {
    /// `None` for absent or unparseable data
    fn get(&self) -> Option<Preferences>;
    /// Best-effort write
    fn set(&self, prefs: &Preferences);
}

/// JSON record on disk, `viewer_settings.json` in the config directory
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = "viewer_settings.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside the given directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Preferences>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write(&self, prefs: &Preferences) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(prefs)?)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self) -> Option<Preferences> {
        match self.read() {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Ignoring stored preferences at {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn set(&self, prefs: &Preferences) {
        match self.write(prefs) {
            Ok(()) => tracing::debug!("Preferences saved to {:?}", self.path),
            Err(e) => tracing::warn!("Failed to save preferences to {:?}: {}", self.path, e),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryRecord {
    prefs: Option<Preferences>,
    writes: usize,
}

/// In-process store; clones share the same record
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(prefs: Preferences) -> Self {
        let store = Self::new();
        store.inner.lock().prefs = Some(prefs);
        store
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self) -> Option<Preferences> {
        self.inner.lock().prefs
    }

    fn set(&self, prefs: &Preferences) {
        let mut record = self.inner.lock();
        record.prefs = Some(*prefs);
        record.writes += 1;
    }
}
