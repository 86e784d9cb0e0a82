use crate::boundary::{BoundaryDetector, BoundaryRegistry};
use crate::document::{char_len, Document};
use crate::error::PartitionError;
use crate::splitter::grown_size;
use serde::{Deserialize, Serialize};

/// Lower-bound estimate of the output file count for one input set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    /// Minimum parts produced by splitting every oversized document
    pub oversized_parts: usize,
    /// Number of documents at or below the ceiling
    pub small_count: usize,
    /// Total characters across small documents
    pub small_total: usize,
    /// `ceil(small_total / ceiling)`
    pub small_bins: usize,
    pub max_size: usize,
    pub max_files: usize,
}

impl FeasibilityReport {
    /// Minimum achievable output file count
    pub fn required_files(&self) -> usize {
        self.oversized_parts + self.small_bins
    }

    pub fn is_feasible(&self) -> bool {
        self.required_files() <= self.max_files
    }

    /// `Ok(())` when feasible, otherwise the matching error
    pub fn ensure(&self) -> Result<(), PartitionError> {
        if self.is_feasible() {
            return Ok(());
        }
        Err(PartitionError::ConstraintInfeasible {
            required: self.required_files(),
            oversized_parts: self.oversized_parts,
            small_bins: self.small_bins,
            max_files: self.max_files,
            max_size: self.max_size,
        })
    }
}

/// Estimate the output file count for `docs` without touching anything
///
/// The small-document term ignores packing fragmentation, so a feasible
/// verdict is necessary but not sufficient for the packer to succeed.
pub fn assess(
    docs: &[Document],
    ceiling: usize,
    max_files: usize,
    registry: &BoundaryRegistry,
    join: &str,
) -> FeasibilityReport {
    let mut oversized_parts = 0;
    let mut small_count = 0;
    let mut small_total = 0;

    for doc in docs {
        if doc.is_oversized(ceiling) {
            let detector = registry.select(&doc.path);
            oversized_parts += estimate_parts(&doc.content, ceiling, detector, join);
        } else {
            small_count += 1;
            small_total += doc.size;
        }
    }

    FeasibilityReport {
        oversized_parts,
        small_count,
        small_total,
        small_bins: small_total.div_ceil(ceiling),
        max_size: ceiling,
        max_files,
    }
}

pub fn is_feasible(
    docs: &[Document],
    ceiling: usize,
    max_files: usize,
    registry: &BoundaryRegistry,
    join: &str,
) -> bool {
    assess(docs, ceiling, max_files, registry, join).is_feasible()
}

/// Minimum number of parts `text` splits into, at least one
///
/// Simulates the splitter's block fill. A block over the ceiling counts
/// `ceil(size / ceiling)` parts instead of simulating its line split.
pub fn estimate_parts(
    text: &str,
    ceiling: usize,
    detector: &dyn BoundaryDetector,
    join: &str,
) -> usize {
    let join_size = char_len(join);
    let mut parts = 0;
    let mut current_size = 0;

    for block in detector.blocks(text) {
        let block_size = char_len(block);

        if block_size > ceiling {
            if current_size > 0 {
                parts += 1;
                current_size = 0;
            }
            parts += block_size.div_ceil(ceiling);
            continue;
        }

        if current_size > 0 && grown_size(current_size, block_size, join_size) > ceiling {
            parts += 1;
            current_size = 0;
        }
        current_size = grown_size(current_size, block_size, join_size);
    }

    if current_size > 0 {
        parts += 1;
    }
    parts.max(1)
}
