use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// String key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store backed by a single JSON file holding an object of string keys to
/// string values. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents. A missing file is `None`; any other I/O failure is
    /// an error.
    fn read_raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read store file {}", self.path.display())),
        }
    }

    fn parse_entries(&self, raw: &str) -> Result<BTreeMap<String, String>> {
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(raw)
            .with_context(|| format!("Invalid store file {}", self.path.display()))
    }

    /// Replace the file atomically: write a temp file next to it, then
    /// rename it over the target. The temp file is removed on failure.
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace store file {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.read_raw()? {
            Some(raw) => Ok(self.parse_entries(&raw)?.remove(key)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Unparsable contents are replaced; read failures abort the write so
        // other keys are never lost.
        let mut entries = match self.read_raw()? {
            Some(raw) => self.parse_entries(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding unparsable store contents: {:#}", e);
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

/// In-memory store. Nothing outlives the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
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
}
