//! Types for reading BUNZ containers
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use indexmap::IndexMap;
use std::io::Cursor;
use tracing::{debug, instrument, trace};

use crate::error::{Error, FileNotFoundError, Result};
use crate::types::{ContainerMetadata, EntryHeader, FileEntry, ENTRY_HEADER_SIZE};

/// A decoded BUNZ container
///
/// The files are rebuilt from the physical entry stream and keep its order (sorted by path).
/// The metadata is kept only as information.
///
/// ```no_run
/// fn list_container_contents(bytes: &[u8]) -> bunz_archive::error::Result<()> {
///     let container = bunz_archive::Container::new(bytes)?;
///
///     for (name, content) in container.iter() {
///         println!("{}: {} bytes", name, content.len());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Container {
    metadata: ContainerMetadata,
    files: IndexMap<Box<str>, Vec<u8>>,
}

impl Container {
    /// Decode a container buffer.
    #[instrument(skip(data), err, fields(size = data.len()))]
    pub fn new(data: &[u8]) -> Result<Container> {
        let mut reader = Cursor::new(data);

        let metadata_length = read_length(&mut reader, "metadata length")?;
        let metadata_bytes = take(&mut reader, metadata_length as u64, "metadata")?;
        let metadata: ContainerMetadata = serde_json::from_slice(metadata_bytes)
            .map_err(|e| Error::CorruptMetadata(e.to_string()))?;
        debug!(
            version = %metadata.version,
            listed = metadata.files.len(),
            "read metadata"
        );

        let mut files: IndexMap<Box<str>, Vec<u8>> = IndexMap::with_capacity(metadata.files.len());
        while remaining(&reader) > 0 {
            ensure_available(&reader, ENTRY_HEADER_SIZE, "entry header")?;
            let header = EntryHeader::read(&mut reader)?;

            let path = take(&mut reader, header.path_length as u64, "entry path")?;
            let path = String::from_utf8(path.to_vec())
                .map_err(|e| Error::InvalidPath(String::from_utf8_lossy(e.as_bytes()).into()))?;
            let content = take(&mut reader, header.content_length as u64, "entry content")?;
            trace!(path = %path, size = content.len(), "read entry");

            if files.contains_key(path.as_str()) {
                return Err(Error::DuplicateEntry(path));
            }
            files.insert(path.into_boxed_str(), content.to_vec());
        }

        if files.len() != metadata.files.len() {
            return Err(Error::CorruptMetadata(format!(
                "metadata lists {} files but the container holds {} entries",
                metadata.files.len(),
                files.len()
            )));
        }

        let container = Container { metadata, files };
        let declared = container.metadata.declared_size().ok_or_else(|| {
            Error::CorruptMetadata("declared file sizes overflow a 64-bit total".into())
        })?;
        if container.extracted_size() != declared {
            return Err(Error::CorruptMetadata(format!(
                "metadata declares {} bytes but the entries hold {} bytes",
                declared,
                container.extracted_size()
            )));
        }

        Ok(container)
    }

    /// The metadata stored at the head of the container
    pub fn metadata(&self) -> &ContainerMetadata {
        &self.metadata
    }

    /// Number of entries contained in this container.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether this container holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all file names in entry order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_ref())
    }

    /// Returns an iterator over every (path, content) pair in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_ref(), content.as_slice()))
    }

    /// Total size of the file contents
    pub fn extracted_size(&self) -> u64 {
        self.files.values().map(|c| c.len() as u64).sum()
    }

    /// Get the index of a file entry by name, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.files.get_index_of(name)
    }

    /// Search for a file entry by name
    pub fn by_name(&self, name: &str) -> Result<&[u8]> {
        self.files
            .get(name)
            .map(|c| c.as_slice())
            .ok_or_else(|| Error::FileNotFound(FileNotFoundError::Name(name.to_owned())))
    }

    /// Get a contained file by index
    pub fn by_index(&self, file_number: usize) -> Result<(&str, &[u8])> {
        self.files
            .get_index(file_number)
            .map(|(name, content)| (name.as_ref(), content.as_slice()))
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))
    }

    /// Unwrap the decoded entries in entry order
    pub fn into_entries(self) -> Vec<FileEntry> {
        self.files
            .into_iter()
            .map(|(path, content)| FileEntry {
                path: path.into(),
                content,
            })
            .collect()
    }
}

/// Decode a container buffer into its metadata and entries
pub fn decode(data: &[u8]) -> Result<(ContainerMetadata, Vec<FileEntry>)> {
    let container = Container::new(data)?;
    let metadata = container.metadata.clone();
    Ok((metadata, container.into_entries()))
}

fn remaining(reader: &Cursor<&[u8]>) -> u64 {
    (reader.get_ref().len() as u64).saturating_sub(reader.position())
}

fn ensure_available(reader: &Cursor<&[u8]>, needed: u64, what: &'static str) -> Result<()> {
    let available = remaining(reader);
    if needed > available {
        return Err(Error::TruncatedEntry {
            what,
            offset: reader.position(),
            needed,
            available,
        });
    }
    Ok(())
}

fn read_length(reader: &mut Cursor<&[u8]>, what: &'static str) -> Result<u32> {
    ensure_available(reader, 4, what)?;
    Ok(reader.read_u32::<LittleEndian>()?)
}

fn take<'a>(reader: &mut Cursor<&'a [u8]>, len: u64, what: &'static str) -> Result<&'a [u8]> {
    ensure_available(reader, len, what)?;
    let start = reader.position() as usize;
    let data: &'a [u8] = *reader.get_ref();
    let slice = &data[start..start + len as usize];
    reader.set_position(reader.position() + len);
    Ok(slice)
}
