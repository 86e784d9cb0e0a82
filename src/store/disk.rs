use super::DocumentStore;
use crate::error::{PartitionError, Result};
use encoding_rs::{Encoding, UTF_8};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Documents on the local filesystem, decoded with a fixed encoding
#[derive(Debug, Clone, Copy)]
pub struct DiskStore {
    encoding: &'static Encoding,
}

impl DiskStore {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Look up an encoding by WHATWG label (e.g. "utf-8", "shift_jis")
    ///
    /// Encodings that `encoding_rs` cannot encode into (UTF-16, replacement)
    /// are rejected, since outputs would come out in a different encoding.
    pub fn with_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PartitionError::UnknownEncoding(label.to_string()))?;
        if encoding.output_encoding() != encoding {
            return Err(PartitionError::UnsupportedEncoding(encoding.name().to_string()));
        }
        Ok(Self::new(encoding))
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Default for DiskStore {
    fn default() -> Self {
        Self::new(UTF_8)
    }
}

impl DocumentStore for DiskStore {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| PartitionError::io("read", path, e))?;

        let (text, had_errors) = self.encoding.decode_with_bom_removal(&bytes);
        if had_errors {
            return Err(PartitionError::Decode {
                path: path.to_path_buf(),
                encoding: self.encoding.name().to_string(),
            });
        }
        Ok(text.into_owned())
    }

    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        let (bytes, used, had_errors) = self.encoding.encode(content);
        if had_errors || used != self.encoding {
            return Err(PartitionError::Encode {
                path: path.to_path_buf(),
                encoding: self.encoding.name().to_string(),
            });
        }

        let mut file = File::create(path).map_err(|e| PartitionError::io("create", path, e))?;
        file.write_all(&bytes)
            .map_err(|e| PartitionError::io("write", path, e))?;
        file.sync_all()
            .map_err(|e| PartitionError::io("sync", path, e))?;
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| PartitionError::io("delete", path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list(&self, dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
            let entry = entry.map_err(|e| PartitionError::io("list", dir, e.into()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn ensure_dir(&mut self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| PartitionError::io("create directory", dir, e))
    }
}
