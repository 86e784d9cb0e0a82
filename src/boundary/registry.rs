use super::{BoundaryDetector, PatternBoundary};
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Dispatch table from file extension to boundary detector
pub struct BoundaryRegistry {
    /// Used for extensions with no registered detector
    fallback: Box<dyn BoundaryDetector>,
    /// Extension -> detector
    map: HashMap<String, Box<dyn BoundaryDetector>>,
}

impl BoundaryRegistry {
    pub fn new(fallback: impl BoundaryDetector + 'static) -> Self {
        Self {
            fallback: Box::new(fallback),
            map: HashMap::new(),
        }
    }

    /// Registry whose fallback splits on a regular expression
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self::new(PatternBoundary::new(pattern)?))
    }

    /// Register a detector for a file extension (without dot, case-insensitive)
    ///
    /// # Example
    /// ```ignore
    /// registry.register("log", LineBoundary);
    /// registry.register("md", DelimiterBoundary::new("\n---\n"));
    /// ```
    pub fn register(&mut self, extension: impl Into<String>, detector: impl BoundaryDetector + 'static) {
        self.map
            .insert(extension.into().to_lowercase(), Box::new(detector));
    }

    /// Select the detector for a document path
    pub fn select(&self, path: &Path) -> &dyn BoundaryDetector {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.map.get(&ext).map(|d| &**d).unwrap_or(&*self.fallback)
    }

    /// Number of extension-specific detectors (excluding fallback)
    pub fn detector_count(&self) -> usize {
        self.map.len()
    }
}
