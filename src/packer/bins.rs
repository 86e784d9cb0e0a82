use crate::document::{bin_path, char_len, Document};
use crate::error::{PartitionError, Result};
use std::path::{Path, PathBuf};

/// An open bin during planning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    /// Indices into the small-document slice, in insertion order
    pub members: Vec<usize>,
    /// Characters including separators between members
    pub size: usize,
}

/// Which small documents get merged and which stay standalone
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackPlan {
    pub bins: Vec<Bin>,
    /// Indices of documents emitted unmerged, in ascending size order
    pub standalone: Vec<usize>,
    /// Documents placed into an already open bin
    pub merges: usize,
}

impl PackPlan {
    /// Outputs contributed by the small documents
    pub fn output_count(&self) -> usize {
        self.bins.len() + self.standalone.len()
    }
}

/// Plan merges for documents of the given sizes
///
/// Merges only as many documents as needed to bring the total output count
/// down to `max_files`: documents are visited smallest first and placed
/// first-fit into open bins, each successful placement counting as one
/// merge. Once enough merges happened the rest stay standalone. When no
/// merging is required nothing is binned at all.
pub fn plan_bins(
    sizes: &[usize],
    part_count: usize,
    ceiling: usize,
    max_files: usize,
    join_size: usize,
) -> PackPlan {
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by_key(|&i| sizes[i]);

    let mut excess = (sizes.len() + part_count).saturating_sub(max_files);
    if excess == 0 {
        return PackPlan {
            standalone: order,
            ..Default::default()
        };
    }
    log::debug!("{} documents must be merged to reach {} files", excess, max_files);

    let mut bins: Vec<Bin> = Vec::new();
    let mut merges = 0;
    let mut consumed = 0;

    for &index in &order {
        consumed += 1;
        let size = sizes[index];

        let slot = bins
            .iter_mut()
            .find(|bin| bin.size + join_size + size <= ceiling);

        match slot {
            Some(bin) => {
                bin.size += join_size + size;
                bin.members.push(index);
                merges += 1;
                excess -= 1;
            }
            None => bins.push(Bin {
                members: vec![index],
                size,
            }),
        }

        if excess == 0 {
            break;
        }
    }

    PackPlan {
        bins,
        standalone: order[consumed..].to_vec(),
        merges,
    }
}

/// A closed bin ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBin {
    pub path: PathBuf,
    /// Source documents in merge order
    pub members: Vec<PathBuf>,
    pub content: String,
    pub size: usize,
}

/// Result of packing the small documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    pub bins: Vec<MergedBin>,
    /// Documents left as they are
    pub standalone: Vec<PathBuf>,
    pub merges: usize,
}

/// Pack small documents next to `part_count` already split parts
///
/// Bins are named `{prefix}_{N}.txt` in `out_dir`. Fails with
/// [`PartitionError::ConsistencyViolation`] if the outputs still exceed
/// `max_files`.
pub fn pack(
    small: &[Document],
    part_count: usize,
    ceiling: usize,
    max_files: usize,
    join: &str,
    out_dir: &Path,
    prefix: &str,
) -> Result<Packing> {
    let sizes: Vec<usize> = small.iter().map(|d| d.size).collect();
    let plan = plan_bins(&sizes, part_count, ceiling, max_files, char_len(join));

    let produced = part_count + plan.output_count();
    if produced > max_files {
        return Err(PartitionError::ConsistencyViolation {
            produced,
            max_files,
        });
    }

    let bins = plan
        .bins
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let content = bin
                .members
                .iter()
                .map(|&m| small[m].content.as_str())
                .collect::<Vec<_>>()
                .join(join);
            MergedBin {
                path: bin_path(out_dir, prefix, i + 1),
                members: bin.members.iter().map(|&m| small[m].path.clone()).collect(),
                size: char_len(&content),
                content,
            }
        })
        .collect();

    Ok(Packing {
        bins,
        standalone: plan.standalone.iter().map(|&i| small[i].path.clone()).collect(),
        merges: plan.merges,
    })
}
