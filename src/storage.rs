//! Panel size persistence.
//!
//! Panel sizes are an opportunistic cache, not authoritative state: the
//! layout must come out usable with or without them. Sizes live in a JSON
//! object keyed by panel id under the single fixed key `panel-sizes`,
//! written through a small key-value store abstraction. The file-backed
//! store keeps one file per key under `~/.tabdeck/`. Corrupt or missing
//! data degrades to an empty mapping; write failures are logged and
//! swallowed with the in-memory state already updated.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed key the size mapping is stored under
pub const PANEL_SIZES_KEY: &str = "panel-sizes";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no state directory available")]
    NoStateDir,
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// String key-value store, the persistence seam. Values are opaque to the
/// store; callers own the format.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under a dot directory in the
/// user's home (`~/.tabdeck/<key>.json`).
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the default store under `~/.tabdeck`. Fails when no home
    /// directory can be determined.
    pub fn open() -> Result<Self, StorageError> {
        let home = home_dir().ok_or(StorageError::NoStateDir)?;
        Ok(Self::at(home.join(".tabdeck")))
    }

    /// Open a store rooted at an explicit directory.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store. Used in tests and as the fallback when no home
/// directory exists; sizes then simply don't survive the process.
#[derive(Default)]
pub struct MemStore {
    entries: HashMap<String, String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A width or height: either a cell count or a string such as `"33.3%"`.
/// Matches the persisted `{width?: number|string, ...}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(f64),
    Text(String),
}

impl Dimension {
    pub fn cells(n: u16) -> Self {
        Dimension::Number(f64::from(n))
    }

    /// Resolve against an available extent. Numbers are cell counts;
    /// strings ending in `%` are a fraction of `total`; other parsable
    /// strings are cell counts. Unresolvable values yield `None` and the
    /// caller falls back as if the dimension were absent.
    pub fn resolve(&self, total: u16) -> Option<u16> {
        match self {
            Dimension::Number(n) if *n >= 0.0 => Some(clamp_cells(*n)),
            Dimension::Number(_) => None,
            Dimension::Text(s) => {
                let s = s.trim();
                if let Some(pct) = s.strip_suffix('%') {
                    let pct: f64 = pct.trim().parse().ok()?;
                    if !(0.0..=100.0).contains(&pct) {
                        return None;
                    }
                    Some(clamp_cells(f64::from(total) * pct / 100.0))
                } else {
                    let n: f64 = s.parse().ok()?;
                    if n >= 0.0 {
                        Some(clamp_cells(n))
                    } else {
                        None
                    }
                }
            }
        }
    }
}

fn clamp_cells(n: f64) -> u16 {
    n.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Persisted size for one panel. Both fields are optional; absent entries
/// fall back to the even-split layout default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

impl SizeRecord {
    pub fn cells(width: u16, height: u16) -> Self {
        Self {
            width: Some(Dimension::cells(width)),
            height: Some(Dimension::cells(height)),
        }
    }
}

/// In-memory size mapping with load/commit against a `KvStore`.
///
/// `record` is a pure merge-by-key; `commit` is the explicit persistence
/// step. A failed commit leaves the in-memory map intact and the layout
/// keeps using it.
#[derive(Debug, Default)]
pub struct PanelSizes {
    entries: HashMap<String, SizeRecord>,
}

impl PanelSizes {
    /// Load the mapping from the store. Missing or malformed data yields
    /// an empty mapping; malformed data is logged, never propagated.
    pub fn load(store: &dyn KvStore) -> Self {
        let Some(raw) = store.get(PANEL_SIZES_KEY) else {
            debug!("no persisted panel sizes");
            return Self::default();
        };
        match serde_json::from_str::<HashMap<String, SizeRecord>>(&raw) {
            Ok(entries) => Self { entries },
            Err(err) => {
                warn!(%err, "discarding malformed panel sizes");
                Self::default()
            }
        }
    }

    pub fn get(&self, panel_id: &str) -> Option<&SizeRecord> {
        self.entries.get(panel_id)
    }

    /// Merge one panel's size into the mapping. Other entries are
    /// untouched.
    pub fn record(&mut self, panel_id: &str, size: SizeRecord) {
        self.entries.insert(panel_id.to_string(), size);
    }

    /// Write the mapping to the store under `panel-sizes`. Failures are
    /// logged and swallowed; the in-memory mapping stays authoritative
    /// for the rest of the session.
    pub fn commit(&self, store: &mut dyn KvStore) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "failed to serialize panel sizes");
                return;
            }
        };
        if let Err(err) = store.set(PANEL_SIZES_KEY, &json) {
            warn!(%err, "failed to persist panel sizes");
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
