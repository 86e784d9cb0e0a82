use std::path::{Path, PathBuf};

/// A text document loaded for one partitioning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Source path, also the document's identity
    pub path: PathBuf,
    /// Full decoded text
    pub content: String,
    /// Size in characters
    pub size: usize,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let size = char_len(&content);
        Self {
            path: path.into(),
            content,
            size,
        }
    }

    /// File stem used to name split parts
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension including the leading dot, or empty
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default()
    }

    pub fn is_oversized(&self, ceiling: usize) -> bool {
        self.size > ceiling
    }
}

/// Size of a piece of text in characters (Unicode scalar values)
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Path of the `number`th split part of `source`, placed in `out_dir`
pub fn part_path(source: &Path, out_dir: &Path, number: usize) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    out_dir.join(format!("{}_part{}{}", stem, number, ext))
}

/// Path of the `number`th merged bin in `out_dir`
pub fn bin_path(out_dir: &Path, prefix: &str, number: usize) -> PathBuf {
    out_dir.join(format!("{}_{}.txt", prefix, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_counts_characters_not_bytes() {
        let doc = Document::new("a.txt", "こんにちは");
        assert_eq!(doc.size, 5);
        assert_eq!(doc.content.len(), 15);
    }

    #[test]
    fn test_stem_and_extension() {
        let doc = Document::new("dir/general.txt", "");
        assert_eq!(doc.stem(), "general");
        assert_eq!(doc.extension(), ".txt");

        let bare = Document::new("dir/README", "");
        assert_eq!(bare.extension(), "");
    }

    #[test]
    fn test_part_path_naming() {
        let path = part_path(Path::new("in/random.txt"), Path::new("out"), 3);
        assert_eq!(path, PathBuf::from("out/random_part3.txt"));
    }

    #[test]
    fn test_bin_path_naming() {
        let path = bin_path(Path::new("out"), "concatenated", 1);
        assert_eq!(path, PathBuf::from("out/concatenated_1.txt"));
    }

    #[test]
    fn test_oversized_is_strict() {
        let doc = Document::new("a.txt", "abcd");
        assert!(!doc.is_oversized(4));
        assert!(doc.is_oversized(3));
    }
}
