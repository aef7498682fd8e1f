// Key-value persistence for page state (filters, dark mode).
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the on-disk layout of `StorageData` require incrementing
// STORAGE_VERSION below.
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const STORAGE_FILENAME: &str = "storage.json";

// Version history:
// - v0: Plain JSON object of string values
// - v1: Wrapped in { version, entries }
const STORAGE_VERSION: u32 = 1;

/// Storage port over string keys and string values.
///
/// Absence of a key means "no saved value". Errors are propagated to the
/// caller, never retried.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, used by tests and as a scratch store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Wrapper struct for versioned storage
#[derive(Serialize, Deserialize, Default)]
struct StorageData {
    #[serde(default)]
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Store backed by a single JSON file.
///
/// Every operation reads the file under an exclusive lock; mutations write
/// it back atomically before releasing the lock.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads the entries. Caller must hold the lock.
    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read storage file '{}'", self.path.display()))?;

        if let Ok(data) = serde_json::from_str::<StorageData>(&json) {
            return Ok(data.entries);
        }

        // Unversioned plain object; upgraded on the next write.
        let entries: BTreeMap<String, String> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse storage file '{}'", self.path.display()))?;
        log::info!(
            "Reading unversioned storage file {}, will upgrade to v{}",
            self.path.display(),
            STORAGE_VERSION
        );
        Ok(entries)
    }

    /// Writes the entries. Caller must hold the lock.
    fn write_entries(&self, entries: BTreeMap<String, String>) -> Result<()> {
        let data = StorageData {
            version: STORAGE_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(&self.path, json)
    }

    fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Self::with_lock(&self.path, || {
            let mut entries = self.read_entries()?;
            f(&mut entries);
            self.write_entries(entries)
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Self::with_lock(&self.path, || Ok(self.read_entries()?.get(key).cloned()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
