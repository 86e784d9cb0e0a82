use std::path::PathBuf;
use thiserror::Error;

/// Result type for partitioning operations
pub type Result<T> = std::result::Result<T, PartitionError>;

#[derive(Error, Debug)]
pub enum PartitionError {
    #[error(
        "Constraints cannot be satisfied: at least {required} files needed \
         ({oversized_parts} split parts + {small_bins} bins) but max_files is {max_files} \
         with max_size {max_size}"
    )]
    ConstraintInfeasible {
        required: usize,
        oversized_parts: usize,
        small_bins: usize,
        max_files: usize,
        max_size: usize,
    },

    #[error("Algorithm error: produced {produced} output files, more than the allowed {max_files}")]
    ConsistencyViolation { produced: usize, max_files: usize },

    #[error("Failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {} as {encoding}", .path.display())]
    Decode { path: PathBuf, encoding: String },

    #[error("Text for {} cannot be represented in {encoding}", .path.display())]
    Encode { path: PathBuf, encoding: String },

    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error("Encoding {0} can be read but not written")]
    UnsupportedEncoding(String),

    #[error("Invalid split pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid output name: {0}")]
    InvalidName(String),

    #[error("No such document: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Output {} would overwrite a file this run does not consume", .0.display())]
    OutputCollision(PathBuf),
}

impl PartitionError {
    /// Wrap an I/O error with the operation and path it came from
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for errors that mean the caller's limits are too tight, not a failure
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::ConstraintInfeasible { .. })
    }
}
