//! Types for writing BUNZ containers
//!

use binrw::BinWrite;
use bon::Builder;
use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::io::{self, Cursor, Write};
use tracing::{debug, instrument, trace, Level};

use crate::error::{Error, Result};
use crate::types::{
    length_field, validate_path, ContainerMetadata, EntryHeader, FileDescriptor, MetadataOrder,
    FORMAT_VERSION,
};

/// Options for how the container should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct ContainerOptions {
    /// Creation time recorded in the metadata, defaults to the time [`ContainerWriter::finish`] runs
    pub created: Option<DateTime<Utc>>,

    /// Order of the metadata file list
    #[builder(default)]
    pub metadata_order: MetadataOrder,
}

/// BUNZ container generator
///
/// Files may be added in any order. The entry stream is always written sorted by path so the
/// same set of files produces the same bytes.
///
/// ```
/// # fn doit() -> bunz_archive::error::Result<()>
/// # {
/// use std::io::Write;
/// use bunz_archive::write::{ContainerOptions, ContainerWriter};
///
/// let mut container = ContainerWriter::new(std::io::Cursor::new(Vec::new()), ContainerOptions::default());
///
/// container.start_file("hello_world.txt")?;
/// container.write_all(b"Hello, World!")?;
///
/// // Apply the changes you've made.
/// let bytes = container.finish()?.into_inner();
/// # assert!(!bytes.is_empty());
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct ContainerWriter<W: Write> {
    inner: W,
    options: ContainerOptions,
    writing_to_file: bool,
    files: IndexMap<Box<str>, Vec<u8>>,
}

impl<W: Write> ContainerWriter<W> {
    /// Initializes the container.
    ///
    /// Before writing to this object, the [`ContainerWriter::start_file`] function should be called.
    pub fn new(inner: W, options: ContainerOptions) -> ContainerWriter<W> {
        ContainerWriter {
            inner,
            options,
            writing_to_file: false,
            files: IndexMap::new(),
        }
    }

    /// Returns true if a file is currently open for writing.
    pub const fn is_writing_file(&self) -> bool {
        self.writing_to_file
    }

    /// Number of files added so far
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Start a new file, closing the previous one.
    #[instrument(skip(self, name), err)]
    pub fn start_file(&mut self, name: impl AsRef<str>) -> Result<()> {
        let name = name.as_ref();
        validate_path(name)?;

        if self.files.contains_key(name) {
            return Err(Error::DuplicateEntry(name.to_owned()));
        }

        trace!(name, "starting entry");
        self.files.insert(name.into(), Vec::new());
        self.writing_to_file = true;

        Ok(())
    }

    /// Add a complete file in one call.
    pub fn add_file(&mut self, name: impl AsRef<str>, content: impl AsRef<[u8]>) -> Result<()> {
        self.start_file(name)?;
        self.write_all(content.as_ref())?;
        self.writing_to_file = false;
        Ok(())
    }

    /// Write the metadata and every entry
    ///
    /// Fails with [`Error::EmptyInput`] when no file has been added.
    #[instrument(skip(self), err)]
    pub fn finish(mut self) -> Result<W> {
        self.writing_to_file = false;

        if self.files.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut sorted: Vec<(&str, &[u8])> = self
            .files
            .iter()
            .map(|(name, content)| (name.as_ref(), content.as_slice()))
            .collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let listed = match self.options.metadata_order {
            MetadataOrder::Sorted => sorted.clone(),
            MetadataOrder::Enumeration => self
                .files
                .iter()
                .map(|(name, content)| (name.as_ref(), content.as_slice()))
                .collect(),
        };

        let metadata = ContainerMetadata {
            version: FORMAT_VERSION.to_owned(),
            created: Some(self.options.created.unwrap_or_else(Utc::now)),
            files: listed
                .iter()
                .map(|(path, content)| FileDescriptor {
                    path: (*path).to_owned(),
                    size: content.len() as u64,
                })
                .collect(),
        };

        let metadata = serde_json::to_vec(&metadata)
            .map_err(|e| Error::CorruptMetadata(e.to_string()))?;
        self.inner
            .write_u32::<LittleEndian>(length_field("metadata", metadata.len())?)?;
        self.inner.write_all(&metadata)?;
        debug!(size = metadata.len(), "wrote metadata");

        for (path, content) in sorted {
            EntryHeader::for_entry(path, content.len())?
                .write(&mut binrw::io::NoSeek::new(&mut self.inner))?;
            self.inner.write_all(path.as_bytes())?;
            self.inner.write_all(content)?;
            trace!(path, size = content.len(), "wrote entry");
        }

        Ok(self.inner)
    }
}

impl<W: Write> Write for ContainerWriter<W> {
    #[instrument(skip_all, err, ret(level = Level::TRACE), fields(size=buf.len()) )]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.writing_to_file {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "No file has been started",
            ));
        }
        let (_, current) = self
            .files
            .last_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file has been started"))?;
        current.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[instrument(skip(self), err)]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Encode a set of files into a container buffer
///
/// Entries are sorted by path, so the result does not depend on the order `files` yields them.
pub fn encode<I, P, C>(files: I, options: ContainerOptions) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (P, C)>,
    P: AsRef<str>,
    C: AsRef<[u8]>,
{
    let mut writer = ContainerWriter::new(Cursor::new(Vec::new()), options);
    for (path, content) in files {
        writer.add_file(path, content)?;
    }
    Ok(writer.finish()?.into_inner())
}
