//! Local filesystem key-value backend
//!
//! Each key is one file under a base directory. Writes replace the whole file.

use super::{KeyValueStore, StorageError};
use std::path::PathBuf;

/// File-per-key store for native builds
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory keys are resolved against
    base_dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `base_dir` (created lazily on first write)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Store in the platform data directory, or the working directory if
    /// the platform has none
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir()
            .map(|dir| dir.join("studio-3d"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_base_dir(base)
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Resolve a key to its file
    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.resolve(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.resolve(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, value)?;
        Ok(())
    }
}
