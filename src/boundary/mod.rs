mod pattern;
mod registry;


pub use pattern::{DelimiterBoundary, LineBoundary, PatternBoundary};
pub use registry::BoundaryRegistry;

/// Default split pattern: a run of blank lines
pub const DEFAULT_SPLIT_PATTERN: &str = r"\n\s*\n";

/// Core trait for segmenting a document into blocks
pub trait BoundaryDetector: Send + Sync {
    /// Split `text` into ordered blocks
    ///
    /// Blocks are trimmed and whitespace-only blocks are dropped, so every
    /// returned slice is non-empty.
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Trim pieces and drop the empty ones
pub(crate) fn clean_blocks<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    pieces
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}
