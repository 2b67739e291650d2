//! CRC-32 checksums for verifying reassembled files.
//!
//! Byte-exact reconstruction is the load-bearing property of a segmented
//! download: the concatenation of all parts must reproduce the original
//! file exactly. This module provides streaming CRC-32 (IEEE 802.3
//! polynomial, the same one used by ZIP and Ethernet) so callers can
//! confirm that property without holding files in memory.
//!
//! # Example
//!
//! ```rust,no_run
//! use filestitch::checksum::{crc32_of_file, crc32_of_parts};
//!
//! # fn main() -> filestitch::Result<()> {
//! let original = crc32_of_file("movie.mp4")?;
//! let restored = crc32_of_parts(&["movie.mp4.0.part", "movie.mp4.1.part"])?;
//! assert_eq!(original, restored);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{COPY_BUFFER_SIZE, Result};

/// Streaming CRC-32 calculator.
#[derive(Clone, Default)]
pub struct Crc32 {
    hasher: crc32fast::Hasher,
}

impl std::fmt::Debug for Crc32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crc32").finish_non_exhaustive()
    }
}

impl Crc32 {
    /// Creates a new calculator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the checksum with additional data.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finishes the computation and returns the checksum.
    pub fn finalize(self) -> u32 {
        self.hasher.finalize()
    }

    /// Computes the checksum of a single slice in one call.
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Feeds the calculator from a reader until end of stream.
    pub fn consume<R: Read>(&mut self, reader: &mut R) -> std::io::Result<u64> {
        let mut buffer = [0u8; COPY_BUFFER_SIZE];
        let mut total = 0u64;
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            self.hasher.update(&buffer[..n]);
            total += n as u64;
        }
        Ok(total)
    }
}

/// Computes the CRC-32 of a file's contents.
pub fn crc32_of_file(path: impl AsRef<Path>) -> Result<u32> {
    let mut file = File::open(path.as_ref())?;
    let mut crc = Crc32::new();
    crc.consume(&mut file)?;
    Ok(crc.finalize())
}

/// Computes the CRC-32 of an ordered part list as one logical stream.
///
/// Equals [`crc32_of_file`] of the original file when the parts are a
/// faithful split of it, supplied in index order.
pub fn crc32_of_parts<P: AsRef<Path>>(parts: &[P]) -> Result<u32> {
    let mut crc = Crc32::new();
    for part in parts {
        let mut file = File::open(part.as_ref())?;
        crc.consume(&mut file)?;
    }
    Ok(crc.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut crc = Crc32::new();
        crc.update(b"Hello, ");
        crc.update(b"World!");
        assert_eq!(crc.finalize(), Crc32::compute(b"Hello, World!"));
    }

    #[test]
    fn test_known_value() {
        // CRC-32 of "123456789" is the standard check value
        assert_eq!(Crc32::compute(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_consume_reports_length() {
        let mut crc = Crc32::new();
        let n = crc.consume(&mut Cursor::new(vec![7u8; 20_000])).unwrap();
        assert_eq!(n, 20_000);
    }

    #[test]
    fn test_parts_stream_equals_whole() {
        let dir = tempfile::tempdir().unwrap();
        let whole = dir.path().join("whole.bin");
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        std::fs::write(&whole, b"abcdefghij").unwrap();
        std::fs::write(&a, b"abcde").unwrap();
        std::fs::write(&b, b"fghij").unwrap();

        assert_eq!(
            crc32_of_file(&whole).unwrap(),
            crc32_of_parts(&[a, b]).unwrap()
        );
    }
}
