mod disk;
mod memory;
mod path;


pub use disk::DiskStore;
pub use memory::{MemoryStore, StoreOp};
pub use path::{check_prefix, normalize};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Flat-file storage the partitioner reads documents from and writes outputs to
pub trait DocumentStore {
    /// Read and decode a whole document
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create or replace a document; must be durable when it returns
    fn write(&mut self, path: &Path, content: &str) -> Result<()>;

    /// Delete a document
    fn remove(&mut self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Files inside `dir`, sorted by path
    fn list(&self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>>;

    /// Make sure `dir` can receive new documents
    fn ensure_dir(&mut self, dir: &Path) -> Result<()>;
}
