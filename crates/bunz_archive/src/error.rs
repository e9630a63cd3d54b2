//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent warpper for [`walkdir::Error`]
    #[error(transparent)]
    WalkDirError(#[from] walkdir::Error),

    /// no files were given to the container encoder
    #[error("no files were given to the container encoder")]
    EmptyInput,

    /// container metadata is corrupt: {0}
    #[error("container metadata is corrupt: {0}")]
    CorruptMetadata(String),

    /// {what} at offset {offset} needs {needed} bytes but only {available} remain
    #[error("{what} at offset {offset} needs {needed} bytes but only {available} remain")]
    TruncatedEntry {
        what: &'static str,
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// {what} is {len} bytes which does not fit in a 32 bit length field
    #[error("{what} is {len} bytes which does not fit in a 32 bit length field")]
    OversizeEntry { what: String, len: u64 },

    /// archive is not a valid gzip stream
    #[error("archive is not a valid gzip stream")]
    Decompression(#[source] std::io::Error),

    /// {0} is not a directory
    #[error("{0} is not a directory")]
    #[diagnostic(help("pack expects the directory to archive"))]
    NotADirectory(PathBuf),

    /// {0} is not a file
    #[error("{0} is not a file")]
    #[diagnostic(help("unpack expects a .bunz archive file"))]
    NotAFile(PathBuf),

    /// {0} contains no files
    #[error("{0} contains no files")]
    EmptyDirectory(PathBuf),

    /// archive contains no entries
    #[error("archive contains no entries")]
    EmptyArchive,

    /// {0:?} is not a valid relative entry path
    #[error("{0:?} is not a valid relative entry path")]
    InvalidPath(String),

    /// {0} appears more than once
    #[error("{0} appears more than once")]
    DuplicateEntry(String),

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
