//! Collecting the files of a directory tree.

use indexmap::IndexMap;
use std::path::{Component, Path};
use tracing::{instrument, trace};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::validate_path;

/// Read every regular file below `root`
///
/// Returns the files in walk order, keyed by their path relative to `root` with `/` separators
/// on every platform. Symbolic links are not followed, so the walk never leaves `root`.
#[instrument(skip(root), err, fields(root = %root.display()))]
pub fn list_files(root: &Path) -> Result<IndexMap<String, Vec<u8>>> {
    let mut files = IndexMap::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = relative_name(root, entry.path())?;
        let content = std::fs::read(entry.path())?;
        trace!(name = %name, size = content.len(), "read file");

        files.insert(name, content);
    }

    Ok(files)
}

/// Express `path` relative to `root` using `/` separators
pub fn relative_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::InvalidPath(path.display().to_string()))?;

    let segments = relative
        .components()
        .map(|component| match component {
            Component::Normal(segment) => segment
                .to_str()
                .ok_or_else(|| Error::InvalidPath(path.display().to_string())),
            _ => Err(Error::InvalidPath(path.display().to_string())),
        })
        .collect::<Result<Vec<_>>>()?;

    let name = segments.join("/");
    validate_path(&name)?;
    Ok(name)
}
