//! Unpacking an archive file back into a directory tree.

use bon::Builder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::compression::decompress;
use crate::error::{Error, Result};
use crate::read::Container;
use crate::stats::Statistics;
use crate::types::{validate_path, ARCHIVE_EXTENSION};

/// Options for how an archive should be unpacked
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct UnpackOptions {
    /// Log every extracted file at `info` instead of `debug`
    #[builder(default)]
    pub verbose: bool,
}

/// Extract every file held by `archive` below `output`
///
/// When `output` is `None` the files land in a directory next to the archive named after it
/// without its extension. Existing files are overwritten. Files written before a failure are
/// left in place.
#[instrument(skip(options), err)]
pub fn unpack(archive: &Path, output: Option<&Path>, options: &UnpackOptions) -> Result<Statistics> {
    if !archive.is_file() {
        return Err(Error::NotAFile(archive.to_path_buf()));
    }

    let compressed = fs::read(archive)?;
    let container = Container::new(&decompress(&compressed)?)?;
    if container.is_empty() {
        return Err(Error::EmptyArchive);
    }

    for name in container.file_names() {
        validate_path(name)?;
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_directory(archive),
    };
    info!("extracting into {}", output.display());
    fs::create_dir_all(&output)?;

    for (name, content) in container.iter() {
        let target = name
            .split('/')
            .fold(output.clone(), |path, segment| path.join(segment));

        if options.verbose {
            info!("writing {} ({} bytes)", target.display(), content.len());
        } else {
            debug!("writing {} ({} bytes)", target.display(), content.len());
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
    }

    let stats = Statistics::extracted(container.len(), container.extracted_size());
    info!(
        files = stats.file_count,
        extracted = stats.original_bytes,
        "unpacked {}",
        stats
    );

    Ok(stats)
}

/// The archive path with its extension removed, or with `_unpacked` appended when it has none
pub fn default_output_directory(archive: &Path) -> PathBuf {
    match archive.extension() {
        Some(_) => archive.with_extension(""),
        None => {
            let mut name = archive.as_os_str().to_owned();
            name.push("_unpacked");
            PathBuf::from(name)
        }
    }
}

/// Whether `path` carries the conventional archive extension
pub fn has_archive_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == ARCHIVE_EXTENSION)
}
