use super::{normalize, DocumentStore};
use crate::error::{PartitionError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A mutation applied to a [`MemoryStore`], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Write(PathBuf),
    Remove(PathBuf),
}

/// In-memory document store for dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Normalized path -> text
    files: BTreeMap<PathBuf, String>,
    /// Every write and remove since creation
    journal: Vec<StoreOp>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert that is not recorded in the journal
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Insert a document without recording it in the journal
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let key = normalize(path.as_ref()).unwrap_or_else(|_| path.as_ref().to_path_buf());
        self.files.insert(key, content.into());
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        let key = normalize(path).ok()?;
        self.files.get(&key).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total characters across all documents
    pub fn total_chars(&self) -> usize {
        self.files.values().map(|t| t.chars().count()).sum()
    }

    pub fn journal(&self) -> &[StoreOp] {
        &self.journal
    }
}

impl DocumentStore for MemoryStore {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.get(path)
            .map(str::to_string)
            .ok_or_else(|| PartitionError::NotFound(path.to_path_buf()))
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        let key = normalize(path)?;
        self.files.insert(key.clone(), content.to_string());
        self.journal.push(StoreOp::Write(key));
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        let key = normalize(path)?;
        if self.files.remove(&key).is_none() {
            return Err(PartitionError::NotFound(path.to_path_buf()));
        }
        self.journal.push(StoreOp::Remove(key));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    fn list(&self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let dir = if dir.as_os_str().is_empty() || dir == Path::new(".") {
            PathBuf::new()
        } else {
            normalize(dir)?
        };

        Ok(self
            .files
            .keys()
            .filter(|path| {
                if recursive {
                    path.starts_with(&dir) && path.as_path() != dir
                } else {
                    path.parent() == Some(dir.as_path())
                }
            })
            .cloned()
            .collect())
    }

    fn ensure_dir(&mut self, _dir: &Path) -> Result<()> {
        Ok(())
    }
}
