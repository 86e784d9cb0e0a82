mod greedy;


pub use greedy::{split_document, split_text, Part};

/// Size of `next` appended to a part of `current` characters, with `join` between
pub(crate) fn grown_size(current: usize, next: usize, join: usize) -> usize {
    if current == 0 {
        next
    } else {
        current + join + next
    }
}
