// Public API exports
pub mod boundary;
pub mod collect;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod packer;
pub mod report;
pub mod splitter;
pub mod store;

// Re-export main types for convenience
pub use error::{PartitionError, Result};

pub use boundary::{
    BoundaryDetector, BoundaryRegistry, DelimiterBoundary, LineBoundary, PatternBoundary,
    DEFAULT_SPLIT_PATTERN,
};

pub use collect::{collect_documents, CollectOptions, NameBlacklist};
pub use config::{PartitionConfig, SortOrder};
pub use document::Document;

pub use engine::{OutputKind, Partitioner, Plan, PlannedOutput};
pub use feasibility::{assess, estimate_parts, is_feasible, FeasibilityReport};
pub use packer::{pack, plan_bins, MergedBin, Packing, DEFAULT_BIN_PREFIX};
pub use splitter::{split_document, split_text, Part};

pub use report::RunReport;
pub use store::{DiskStore, DocumentStore, MemoryStore};
