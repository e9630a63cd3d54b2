//! Aggregate figures reported by packing and unpacking.

use std::fmt;

/// Summary of a [`crate::pack`] or [`crate::unpack`] run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Number of files packed or extracted
    pub file_count: usize,

    /// Total size of the file contents before packing, or after extraction
    pub original_bytes: u64,

    /// Size of the archive on disk, known when packing
    pub compressed_bytes: Option<u64>,

    /// Percentage of space saved by packing, rounded to two decimals
    pub ratio: Option<f64>,
}

impl Statistics {
    pub fn packed(file_count: usize, original_bytes: u64, compressed_bytes: u64) -> Self {
        Self {
            file_count,
            original_bytes,
            compressed_bytes: Some(compressed_bytes),
            ratio: Some(saved_percentage(original_bytes, compressed_bytes)),
        }
    }

    pub fn extracted(file_count: usize, extracted_bytes: u64) -> Self {
        Self {
            file_count,
            original_bytes: extracted_bytes,
            compressed_bytes: None,
            ratio: None,
        }
    }
}

/// `(1 - compressed / original) * 100`, rounded to two decimals
///
/// An empty original reports `0.0` since nothing could be saved.
pub fn saved_percentage(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let saved = (1.0 - compressed as f64 / original as f64) * 100.0;
    (saved * 100.0).round() / 100.0
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.compressed_bytes, self.ratio) {
            (Some(compressed), Some(ratio)) => write!(
                f,
                "{} files, {} bytes -> {} bytes ({:.2}% saved)",
                self.file_count, self.original_bytes, compressed, ratio
            ),
            _ => write!(
                f,
                "{} files, {} bytes extracted",
                self.file_count, self.original_bytes
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::stats::{saved_percentage, Statistics};

    #[test]
    fn saved_percentage_rounds_to_two_decimals() {
        assert_eq!(saved_percentage(1000, 250), 75.0);
        assert_eq!(saved_percentage(3, 1), 66.67);
        assert_eq!(saved_percentage(100, 150), -50.0);
        assert_eq!(saved_percentage(0, 20), 0.0);
    }

    #[test]
    fn display() {
        assert_eq!(
            Statistics::packed(3, 1000, 250).to_string(),
            "3 files, 1000 bytes -> 250 bytes (75.00% saved)"
        );
        assert_eq!(
            Statistics::extracted(3, 1000).to_string(),
            "3 files, 1000 bytes extracted"
        );
    }
}
