//! This library packs directory trees into **BUNZ** archives and unpacks them again.
//!
//! # BUNZ Archive Format Documentation
//!
//! A BUNZ archive is a single gzip stream (RFC 1952) wrapping a *container*. The container holds a
//! JSON metadata block followed by one entry per file. BUNZ files are typically identified with the
//! `.bunz` extension, although nothing in the format depends on it.
//!
//! ## Container Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Metadata Length        | 4 bytes: Length of the metadata block                      |
//! | 0x0004         | Metadata               | (Metadata Length) bytes: UTF-8 JSON                        |
//! | ...            | Entries                | Repeated until the end of the container                    |
//!
//! ### Metadata
//!
//! The metadata is a JSON object summarising the container:
//!
//! ```json
//! {"version":"1.0","created":"2024-01-02T03:04:05Z","files":[{"path":"a.txt","size":2}]}
//! ```
//!
//! - **version**: Format version of the writer.
//! - **created**: RFC 3339 timestamp of when the container was written.
//! - **files**: The (path, size) pair of every file. Only this field is required when reading.
//!
//! The file list lets a reader enumerate an archive without walking the entries, but it is only a
//! hint. Files are always rebuilt from the entries. A reader checks that the list agrees with the
//! entries in count and total size, never in order.
//!
//! ### Entries
//!
//! Entries are stored in ascending byte order of their path, so the same set of files always
//! produces the same container. Each entry has the following structure:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Path Length            | 4 bytes: Length of the path                             |
//! | 0x0004         | Content Length         | 4 bytes: Length of the content                          |
//! | 0x0008         | Path                   | (Path Length) bytes: UTF-8 path                         |
//! | ...            | Content                | (Content Length) bytes: Raw file content                |
//!
//! Paths are relative, use `/` as separator and never contain empty, `.` or `..` segments.
//! Every length must be exact: a length reaching past the end of the container is an error and is
//! never clamped.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bunz`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression**: gzip, level 1 to 9 (default 9)
//!

pub mod compression;
pub mod error;
pub mod pack;
pub mod read;
pub mod stats;
pub mod types;
pub mod unpack;
pub mod walk;
pub mod write;

pub use compression::CompressionLevel;
pub use pack::{pack, PackOptions};
pub use read::{decode, Container};
pub use stats::Statistics;
pub use unpack::{unpack, UnpackOptions};
pub use write::{encode, ContainerWriter};
