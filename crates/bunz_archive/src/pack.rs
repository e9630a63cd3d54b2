//! Packing a directory tree into an archive file.

use bon::Builder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::compression::{compress, CompressionLevel};
use crate::error::{Error, Result};
use crate::stats::Statistics;
use crate::types::{MetadataOrder, ARCHIVE_EXTENSION};
use crate::walk::list_files;
use crate::write::{encode, ContainerOptions};

/// Options for how a directory should be packed
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct PackOptions {
    /// Gzip compression level, out of range values fall back to the default
    #[builder(default, into)]
    pub level: CompressionLevel,

    /// Log every packed file at `info` instead of `debug`
    #[builder(default)]
    pub verbose: bool,

    /// Order of the metadata file list
    #[builder(default)]
    pub metadata_order: MetadataOrder,
}

/// Pack every regular file below `directory` into a single archive
///
/// The archive is written to `output`, or to `<directory name>.bunz` in the current directory.
/// An existing file at that path is replaced. Nothing is written unless the whole archive was
/// built in memory first.
#[instrument(skip(options), err)]
pub fn pack(directory: &Path, output: Option<&Path>, options: &PackOptions) -> Result<Statistics> {
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let files = list_files(directory)?;
    if files.is_empty() {
        return Err(Error::EmptyDirectory(directory.to_path_buf()));
    }

    let mut original_bytes = 0u64;
    for (name, content) in &files {
        original_bytes += content.len() as u64;
        if options.verbose {
            info!("packing {} ({} bytes)", name, content.len());
        } else {
            debug!("packing {} ({} bytes)", name, content.len());
        }
    }

    let container = encode(
        &files,
        ContainerOptions::builder()
            .metadata_order(options.metadata_order)
            .build(),
    )?;
    let compressed = compress(&container, options.level)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_archive_path(directory)?,
    };
    info!("writing {}", output.display());
    fs::write(&output, &compressed)?;

    let stats = Statistics::packed(files.len(), original_bytes, compressed.len() as u64);
    info!(
        files = stats.file_count,
        original = stats.original_bytes,
        compressed = compressed.len(),
        "packed {}",
        stats
    );

    Ok(stats)
}

/// `<directory name>.bunz`, relative to the current directory
pub fn default_archive_path(directory: &Path) -> Result<PathBuf> {
    let directory = directory.canonicalize()?;
    let name = directory
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("archive");
    Ok(PathBuf::from(format!("{name}.{ARCHIVE_EXTENSION}")))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tracing_test::traced_test;

    use crate::compression::{decompress, CompressionLevel};
    use crate::error::{Error, Result};
    use crate::pack::{default_archive_path, pack, PackOptions};
    use crate::read::Container;

    #[traced_test]
    #[test]
    fn pack_reports_statistics() -> Result<()> {
        let root = tempfile::tempdir()?;
        let source = root.path().join("project");
        std::fs::create_dir_all(source.join("sub"))?;
        std::fs::write(source.join("a.txt"), "hi")?;
        std::fs::write(source.join("sub").join("b.txt"), "")?;
        std::fs::write(source.join("sub").join("c.txt"), "x".repeat(4096))?;

        let output = root.path().join("project.bunz");
        let stats = pack(&source, Some(output.as_path()), &PackOptions::default())?;

        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.original_bytes, 4098);
        assert_eq!(
            stats.compressed_bytes,
            Some(std::fs::metadata(&output)?.len())
        );
        assert!(stats.ratio.is_some_and(|ratio| ratio > 0.0));
        assert!(logs_contain("packed 3 files"));

        let container = Container::new(&decompress(&std::fs::read(&output)?)?)?;
        assert_eq!(
            container.file_names().collect::<Vec<_>>(),
            vec!["a.txt", "sub/b.txt", "sub/c.txt"]
        );

        Ok(())
    }

    #[traced_test]
    #[test]
    fn verbose_logs_every_file() -> Result<()> {
        let root = tempfile::tempdir()?;
        let source = root.path().join("src");
        std::fs::create_dir_all(&source)?;
        std::fs::write(source.join("only.txt"), "content")?;

        pack(
            &source,
            Some(root.path().join("out.bunz").as_path()),
            &PackOptions::builder().verbose(true).level(1u32).build(),
        )?;
        assert!(logs_contain("packing only.txt (7 bytes)"));

        Ok(())
    }

    #[test]
    fn existing_output_is_overwritten() -> Result<()> {
        let root = tempfile::tempdir()?;
        let source = root.path().join("src");
        std::fs::create_dir_all(&source)?;
        std::fs::write(source.join("file.txt"), "new")?;

        let output = root.path().join("out.bunz");
        std::fs::write(&output, "stale archive")?;

        let stats = pack(&source, Some(output.as_path()), &PackOptions::default())?;
        assert_eq!(stats.file_count, 1);
        assert_ne!(std::fs::read(&output)?, b"stale archive");

        Ok(())
    }

    #[test]
    fn out_of_range_level_still_packs() -> Result<()> {
        let options = PackOptions::builder().level(42u32).build();
        assert_eq!(options.level, CompressionLevel::DEFAULT);

        let root = tempfile::tempdir()?;
        let source = root.path().join("src");
        std::fs::create_dir_all(&source)?;
        std::fs::write(source.join("file.txt"), "data")?;

        let stats = pack(&source, Some(root.path().join("out.bunz").as_path()), &options)?;
        assert_eq!(stats.file_count, 1);

        Ok(())
    }

    #[test]
    fn invalid_inputs_are_rejected_without_output() -> Result<()> {
        let root = tempfile::tempdir()?;
        let output = root.path().join("out.bunz");

        let missing = root.path().join("missing");
        assert!(matches!(
            pack(&missing, Some(output.as_path()), &PackOptions::default()),
            Err(Error::NotADirectory(path)) if path == missing
        ));

        let file = root.path().join("file.txt");
        std::fs::write(&file, "not a directory")?;
        assert!(matches!(
            pack(&file, Some(output.as_path()), &PackOptions::default()),
            Err(Error::NotADirectory(_))
        ));

        let empty = root.path().join("empty");
        std::fs::create_dir_all(empty.join("nested"))?;
        assert!(matches!(
            pack(&empty, Some(output.as_path()), &PackOptions::default()),
            Err(Error::EmptyDirectory(_))
        ));

        assert!(!output.exists());

        Ok(())
    }

    #[test]
    fn default_archive_name_uses_directory_name() -> Result<()> {
        let root = tempfile::tempdir()?;
        let source = root.path().join("my_data");
        std::fs::create_dir_all(&source)?;

        assert_eq!(
            default_archive_path(&source)?,
            PathBuf::from("my_data.bunz")
        );
        assert_eq!(
            default_archive_path(&source.join("."))?,
            PathBuf::from("my_data.bunz")
        );

        Ok(())
    }
}
