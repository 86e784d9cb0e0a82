use super::grown_size;
use crate::boundary::BoundaryDetector;
use crate::document::{char_len, part_path, Document};
use std::path::{Path, PathBuf};

/// One size-bounded piece of an oversized document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Where the part will be written
    pub path: PathBuf,
    /// Document the part was cut from
    pub source: PathBuf,
    /// 1-based sequence number within the source
    pub number: usize,
    /// Part text, trailing whitespace stripped
    pub content: String,
    /// Size in characters
    pub size: usize,
}

/// Split a document into parts named `{stem}_part{N}{ext}` inside `out_dir`
///
/// Always returns at least one part, even when the document has no
/// non-whitespace content.
pub fn split_document(
    doc: &Document,
    out_dir: &Path,
    ceiling: usize,
    detector: &dyn BoundaryDetector,
    join: &str,
) -> Vec<Part> {
    let mut texts = split_text(&doc.content, ceiling, detector, join);
    if texts.is_empty() {
        texts.push(String::new());
    }

    texts
        .into_iter()
        .enumerate()
        .map(|(i, content)| {
            let number = i + 1;
            Part {
                path: part_path(&doc.path, out_dir, number),
                source: doc.path.clone(),
                number,
                size: char_len(&content),
                content,
            }
        })
        .collect()
}

/// Greedily pack the blocks of `text` into parts of at most `ceiling` characters
///
/// Blocks are joined with `join`. A block larger than the ceiling is cut at
/// line boundaries instead, never sharing a part with its neighbours. A
/// single line larger than the ceiling is emitted on its own.
pub fn split_text(
    text: &str,
    ceiling: usize,
    detector: &dyn BoundaryDetector,
    join: &str,
) -> Vec<String> {
    let join_size = char_len(join);
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_size = 0;

    for block in detector.blocks(text) {
        let block_size = char_len(block);

        if block_size > ceiling {
            flush(&mut parts, &mut current, &mut current_size);
            split_block_by_lines(block, ceiling, &mut parts);
            continue;
        }

        if current_size > 0 && grown_size(current_size, block_size, join_size) > ceiling {
            flush(&mut parts, &mut current, &mut current_size);
        }

        if current_size > 0 {
            current.push_str(join);
        }
        current.push_str(block);
        current_size = grown_size(current_size, block_size, join_size);
    }

    flush(&mut parts, &mut current, &mut current_size);
    parts
}

/// Line-level fallback for one over-ceiling block
fn split_block_by_lines(block: &str, ceiling: usize, parts: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_size = 0;

    for line in block.split_inclusive('\n') {
        // The line break only counts once another line follows it
        let visible_size = char_len(line.trim_end());

        if current_size > 0 && current_size + visible_size > ceiling {
            flush(parts, &mut current, &mut current_size);
        }
        if visible_size > ceiling {
            log::warn!(
                "Line of {} characters exceeds max size {}, emitting it unsplit",
                visible_size,
                ceiling
            );
        }

        current.push_str(line);
        current_size += char_len(line);
    }

    flush(parts, &mut current, &mut current_size);
}

/// Close the current part if it has content
fn flush(parts: &mut Vec<String>, current: &mut String, current_size: &mut usize) {
    if *current_size == 0 {
        return;
    }
    parts.push(current.trim_end().to_string());
    current.clear();
    *current_size = 0;
}
