use crate::boundary::DEFAULT_SPLIT_PATTERN;
use crate::collect::CollectOptions;
use crate::error::{PartitionError, Result};
use crate::packer::DEFAULT_BIN_PREFIX;
use crate::store::check_prefix;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Order in which documents are fed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// As collected (sorted by path)
    #[default]
    Path,
    /// Largest documents first
    SizeDescending,
}

/// Limits and formatting for one partitioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Maximum characters per output file
    pub max_size: usize,
    /// Maximum number of output files
    pub max_files: usize,
    /// Regular expression separating blocks inside a document
    #[serde(default = "default_split_pattern")]
    pub split_pattern: String,
    /// Inserted between blocks and between merged documents
    #[serde(default = "default_join_separator")]
    pub join_separator: String,
    /// WHATWG encoding label for reading and writing documents
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Merged bins are named `{bin_prefix}_{N}.txt`
    #[serde(default = "default_bin_prefix")]
    pub bin_prefix: String,
    /// Where parts and bins are written; the input directory when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default)]
    pub collect: CollectOptions,
}

fn default_split_pattern() -> String {
    DEFAULT_SPLIT_PATTERN.to_string()
}

fn default_join_separator() -> String {
    "\n\n".to_string()
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_bin_prefix() -> String {
    DEFAULT_BIN_PREFIX.to_string()
}

impl PartitionConfig {
    /// Config with the given limits and default formatting
    pub fn new(max_size: usize, max_files: usize) -> Self {
        Self {
            max_size,
            max_files,
            split_pattern: default_split_pattern(),
            join_separator: default_join_separator(),
            encoding: default_encoding(),
            bin_prefix: default_bin_prefix(),
            output_dir: None,
            order: SortOrder::default(),
            collect: CollectOptions::default(),
        }
    }

    /// Load from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| PartitionError::io("read", path, e))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PartitionError::invalid_config(e.to_string()))
    }

    pub fn split_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.split_pattern = pattern.into();
        self
    }

    pub fn join_separator(mut self, separator: impl Into<String>) -> Self {
        self.join_separator = separator.into();
        self
    }

    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    pub fn bin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bin_prefix = prefix.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Output directory for documents collected from `input_dir`
    pub fn resolve_output_dir(&self, input_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| input_dir.to_path_buf())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(PartitionError::invalid_config("max_size must be > 0"));
        }
        if self.max_files == 0 {
            return Err(PartitionError::invalid_config("max_files must be > 0"));
        }
        if self.split_pattern.is_empty() {
            return Err(PartitionError::invalid_config("split_pattern must not be empty"));
        }
        check_prefix(&self.bin_prefix)
    }
}
