use crate::feasibility::FeasibilityReport;
use std::path::{Path, PathBuf};

/// How an output file came to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    /// Piece of a split document
    Part { source: PathBuf, number: usize },
    /// Several small documents joined together
    Bin { members: Vec<PathBuf> },
    /// Small document left where it is
    Untouched,
}

impl OutputKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Part { .. } => "part",
            Self::Bin { .. } => "bin",
            Self::Untouched => "untouched",
        }
    }

    /// Input documents that ended up in this output
    pub fn sources<'a>(&'a self, path: &'a Path) -> Vec<&'a Path> {
        match self {
            Self::Part { source, .. } => vec![source.as_path()],
            Self::Bin { members } => members.iter().map(PathBuf::as_path).collect(),
            Self::Untouched => vec![path],
        }
    }
}

/// One output of a run, staged in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub path: PathBuf,
    pub kind: OutputKind,
    pub content: String,
    /// Size in characters
    pub size: usize,
}

impl PlannedOutput {
    /// Untouched documents already exist and are not rewritten
    pub fn needs_write(&self) -> bool {
        !matches!(self.kind, OutputKind::Untouched)
    }
}

/// Everything a run will do, computed before the store is touched
#[derive(Debug, Clone)]
pub struct Plan {
    pub feasibility: FeasibilityReport,
    /// Parts first, then untouched documents, then bins
    pub outputs: Vec<PlannedOutput>,
    /// Inputs whose content moved into parts or bins
    pub consumed: Vec<PathBuf>,
    pub input_count: usize,
    pub split_documents: usize,
    pub merges: usize,
}

impl Plan {
    pub fn output_paths(&self) -> Vec<PathBuf> {
        self.outputs.iter().map(|o| o.path.clone()).collect()
    }

    pub fn count(&self, label: &str) -> usize {
        self.outputs.iter().filter(|o| o.kind.label() == label).count()
    }

    /// Outputs over `ceiling`, only possible for a single over-long line
    pub fn oversized_outputs(&self, ceiling: usize) -> usize {
        self.outputs.iter().filter(|o| o.size > ceiling).count()
    }

    /// Consumed inputs that must be deleted, i.e. not overwritten by an output
    pub fn removals(&self) -> Vec<&Path> {
        self.consumed
            .iter()
            .filter(|source| !self.outputs.iter().any(|o| o.needs_write() && &o.path == *source))
            .map(PathBuf::as_path)
            .collect()
    }
}
