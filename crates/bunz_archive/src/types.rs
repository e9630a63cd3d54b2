//! Base types for structure of a BUNZ container.

use binrw::{BinRead, BinWrite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Version string written into the metadata of every container
pub const FORMAT_VERSION: &str = "1.0";

/// Conventional file extension of a BUNZ archive
pub const ARCHIVE_EXTENSION: &str = "bunz";

/// Size in bytes of an [`EntryHeader`] on the wire
pub const ENTRY_HEADER_SIZE: u64 = 8;

/// Header preceding every entry in the container
///
/// Both lengths are exact byte counts so a reader can skip an entry without interpreting it.
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct EntryHeader {
    /// The length of the UTF-8 path following the header
    pub path_length: u32,

    /// The length of the raw content following the path
    pub content_length: u32,
}

impl EntryHeader {
    /// Build a header for the given path and content, failing if either does not fit in 32 bits
    pub fn for_entry(path: &str, content_length: usize) -> Result<Self> {
        Ok(Self {
            path_length: length_field(path, path.len())?,
            content_length: length_field(path, content_length)?,
        })
    }
}

pub(crate) fn length_field(what: &str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::OversizeEntry {
        what: what.to_owned(),
        len: len as u64,
    })
}

/// One (path, size) pair listed in [`ContainerMetadata`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Relative path of the file
    pub path: String,

    /// Declared size of the file content in bytes
    pub size: u64,
}

/// JSON summary stored at the head of the container
///
/// The file list is informational. Readers rebuild files from the entry stream, never from this list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContainerMetadata {
    /// Format version of the writer
    #[serde(default)]
    pub version: String,

    /// When the container was created
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Files held by the container
    pub files: Vec<FileDescriptor>,
}

impl ContainerMetadata {
    /// Sum of the declared sizes of every listed file, `None` if it does not fit in a `u64`
    pub fn declared_size(&self) -> Option<u64> {
        self.files
            .iter()
            .try_fold(0u64, |total, f| total.checked_add(f.size))
    }
}

/// A single file held in a container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    /// Relative path using `/` separators
    pub path: String,

    /// Raw file content
    pub content: Vec<u8>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Length of the content in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Order of the file list written into [`ContainerMetadata`]
///
/// The entry stream itself is always sorted by path.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum MetadataOrder {
    /// List files sorted by path, matching the entry stream
    #[default]
    Sorted,

    /// List files in the order they were handed to the writer
    Enumeration,
}

/// Check that `path` is a relative, `/` separated path that stays below its root
///
/// Segments may not carry a drive prefix (`:`).
///
/// # Warnings
///
/// Paths read from a container are attacker controlled. They must pass this check before being
/// joined onto an output directory.
pub fn validate_path(path: &str) -> Result<()> {
    let valid = !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && !path.contains('\0')
        && !path.contains(':')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidPath(path.to_owned()))
    }
}
