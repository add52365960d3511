//! JSON-file-backed profile store.

use crate::error::{StorageError, StorageResult};
use crate::ProfileStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Directory name under the platform data dir.
const APP_DIR: &str = "akademi";
/// File name of the profile map.
const PROFILE_FILE: &str = "profile.json";

/// A [`ProfileStore`] persisted as a single JSON object on disk.
///
/// The whole map is held in memory and flushed on every write via a
/// temp-file rename, so a crash mid-write leaves either the old or the new
/// file, never a torn one.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens (or creates) the store at the default platform location,
    /// e.g. `~/.local/share/akademi/profile.json` on Linux.
    pub fn open_default() -> StorageResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| StorageError::Unavailable("no platform data directory".to_string()))?;
        Self::open(base.join(APP_DIR).join(PROFILE_FILE))
    }

    /// Opens (or creates) the store at an explicit path.
    ///
    /// A file that exists but fails to parse is treated as absent: the store
    /// starts empty and the first write replaces it. Persisted state is
    /// advisory here, losing it logs a warning rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "profile file malformed, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the path this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("profile store lock poisoned".to_string()))
    }
}

impl ProfileStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}
