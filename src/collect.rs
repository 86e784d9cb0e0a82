use crate::error::Result;
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which files in the input directory count as documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    /// Extension without dot; empty matches every file
    pub extension: String,
    /// Descend into subdirectories
    pub recursive: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            recursive: false,
        }
    }
}

impl CollectOptions {
    fn matches_extension(&self, path: &Path) -> bool {
        if self.extension.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

/// List the documents under `dir` that `filter` accepts, sorted by path
pub fn collect_documents<S, F>(
    store: &S,
    dir: &Path,
    options: &CollectOptions,
    filter: F,
) -> Result<Vec<PathBuf>>
where
    S: DocumentStore + ?Sized,
    F: Fn(&Path) -> bool,
{
    let mut documents = Vec::new();

    for path in store.list(dir, options.recursive)? {
        if !options.matches_extension(&path) {
            continue;
        }
        if !filter(&path) {
            log::info!("Skipping {}", path.display());
            continue;
        }
        documents.push(path);
    }

    Ok(documents)
}

/// Rejects documents whose stem or parent directory contains a listed name
///
/// Chat exports keep one file or folder per channel, so this is how noisy
/// channels are kept out of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameBlacklist {
    names: Vec<String>,
}

impl NameBlacklist {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .filter(|n: &String| !n.is_empty())
                .collect(),
        }
    }

    pub fn allows(&self, path: &Path) -> bool {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        !self
            .names
            .iter()
            .any(|name| stem.contains(name.as_str()) || parent.contains(name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
