//! Pluggable key/value persistence for the data store.
//!
//! The store reads and writes JSON documents under namespaced string keys.
//! Keeping the persistence behind a trait (instead of ambient global state)
//! lets tests run against an in-memory map while the CLI uses files.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Flat synchronous key/value persistence boundary.
///
/// Not safe for concurrent writers; callers with multiple logical writers
/// must serialize access externally.
pub trait StorageBackend {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend for tests and ephemeral use.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
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

/// File-per-key backend rooted at a directory.
///
/// Each key maps to `<dir>/<key>.json`. Writes go through a temp file plus
/// rename so a crash mid-write never leaves a corrupted document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens a backend rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move {} into place", temp_path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_round_trip() -> Result<()> {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("missing")?, None);

        backend.set("a-key", "[1,2,3]")?;
        assert_eq!(backend.get("a-key")?.as_deref(), Some("[1,2,3]"));

        backend.set("a-key", "[]")?;
        assert_eq!(backend.get("a-key")?.as_deref(), Some("[]"));

        backend.remove("a-key")?;
        assert_eq!(backend.get("a-key")?, None);
        // Removing again is fine
        backend.remove("a-key")?;
        Ok(())
    }

    #[test]
    fn test_file_backend_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut backend = FileBackend::new(dir.path())?;

        assert_eq!(backend.get("missing")?, None);
        backend.set("workshop-cards-templates", "[]")?;
        assert_eq!(
            backend.get("workshop-cards-templates")?.as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("workshop-cards-templates.json").exists());

        backend.remove("workshop-cards-templates")?;
        assert_eq!(backend.get("workshop-cards-templates")?, None);
        Ok(())
    }

    #[test]
    fn test_file_backend_survives_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        {
            let mut backend = FileBackend::new(dir.path())?;
            backend.set("key", "\"value\"")?;
        }
        let backend = FileBackend::new(dir.path())?;
        assert_eq!(backend.get("key")?.as_deref(), Some("\"value\""));
        Ok(())
    }
}
