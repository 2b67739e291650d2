//! Split planning and part metadata.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Generates the part path for a base path and part index.
///
/// This is the naming convention consumed by downstream reassembly
/// tooling: `<base>.<index>.part`, index zero-based, no zero-padding.
///
/// # Example
///
/// ```rust
/// use filestitch::part_path;
/// use std::path::PathBuf;
///
/// assert_eq!(part_path("movie.mp4", 0), PathBuf::from("movie.mp4.0.part"));
/// assert_eq!(part_path("/data/movie.mp4", 12), PathBuf::from("/data/movie.mp4.12.part"));
/// ```
pub fn part_path(base: impl AsRef<Path>, index: u32) -> PathBuf {
    let base = base.as_ref().to_string_lossy();
    PathBuf::from(format!("{}.{}.part", base, index))
}

/// Describes how one source file maps onto N parts.
///
/// The block size is `total_size / part_count` (floor division); the final
/// part absorbs the remainder so the part lengths always sum to
/// `total_size` exactly. A plan is derived per split call and discarded
/// afterwards; it is never persisted independently of the parts it
/// produced.
///
/// # Example
///
/// ```rust
/// use filestitch::SplitPlan;
///
/// let plan = SplitPlan::new(10_000_001, 4).unwrap();
/// assert_eq!(plan.block_size(), 2_500_000);
/// assert_eq!(plan.part_len(0), 2_500_000);
/// assert_eq!(plan.part_len(3), 2_500_001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPlan {
    total_size: u64,
    part_count: u32,
    block_size: u64,
}

impl SplitPlan {
    /// Creates a plan for splitting `total_size` bytes into `part_count`
    /// parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPartCount`] unless
    /// `1 <= part_count <= total_size`; every part must hold at least one
    /// byte, which also rules out splitting an empty source.
    pub fn new(total_size: u64, part_count: u32) -> Result<Self> {
        if part_count == 0 || u64::from(part_count) > total_size {
            return Err(Error::InvalidPartCount {
                part_count,
                total_size,
            });
        }
        Ok(Self {
            total_size,
            part_count,
            block_size: total_size / u64::from(part_count),
        })
    }

    /// Returns the byte length of the source.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Returns the number of parts.
    pub fn part_count(&self) -> u32 {
        self.part_count
    }

    /// Returns the length of every part except possibly the last.
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Returns the target length of the given part.
    ///
    /// # Panics
    ///
    /// Panics if `index >= part_count`.
    pub fn part_len(&self, index: u32) -> u64 {
        assert!(index < self.part_count, "part index out of range");
        if index + 1 == self.part_count {
            self.total_size - self.block_size * u64::from(self.part_count - 1)
        } else {
            self.block_size
        }
    }

    /// Returns the byte offset of the given part within the source.
    ///
    /// # Panics
    ///
    /// Panics if `index >= part_count`.
    pub fn offset(&self, index: u32) -> u64 {
        assert!(index < self.part_count, "part index out of range");
        self.block_size * u64::from(index)
    }
}

/// One contiguous byte range of a logical file, materialized on disk.
///
/// The `index` defines merge order; the concatenation of part bytes in
/// index order equals the original file's bytes. `length` is the byte
/// length currently on disk, which can be shorter than the planned length
/// if an earlier split or download was interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Ordinal position, zero-based.
    pub index: u32,
    /// Location of the materialized part.
    pub path: PathBuf,
    /// Byte length currently on disk.
    pub length: u64,
}

impl FilePart {
    /// Builds a part record from a file already on disk.
    ///
    /// Reads the current on-disk length, so the record reflects what is
    /// actually present rather than what a plan intended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path cannot be inspected and
    /// [`Error::NotAFile`] if it is not a regular file.
    pub fn from_path(index: u32, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let meta = fs::metadata(&path)?;
        if !meta.is_file() {
            return Err(Error::NotAFile { path });
        }
        Ok(Self {
            index,
            length: meta.len(),
            path,
        })
    }
}
