use crate::error::{PartitionError, Result};
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and resolve `..`
///
/// A `..` that would climb above the start of a relative path is rejected.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => continue,
            Component::ParentDir => {
                if depth == 0 {
                    return Err(PartitionError::InvalidName(format!(
                        "Parent directory traversal not allowed: {}",
                        path.display()
                    )));
                }
                out.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }

    if depth == 0 {
        return Err(PartitionError::InvalidName(format!(
            "No file name in path: {}",
            path.display()
        )));
    }
    Ok(out)
}

/// Check that a bin prefix names a plain file in the output directory
pub fn check_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(PartitionError::InvalidName("Empty bin prefix".to_string()));
    }

    let mut components = Path::new(prefix).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !prefix.contains(['/', '\\']) => Ok(()),
        _ => Err(PartitionError::InvalidName(format!(
            "Bin prefix must be a plain file name: {}",
            prefix
        ))),
    }
}
