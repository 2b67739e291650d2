//! Error types for assembly and storage discovery operations.
//!
//! All fallible operations in this crate return `Result<T, Error>`. Handle
//! errors with the `?` operator or by matching on specific variants:
//!
//! ```rust,no_run
//! use filestitch::{Error, merge};
//!
//! match merge("target.bin", &["target.bin.0.part", "target.bin.1.part"]) {
//!     Ok(written) => println!("merged {} bytes", written),
//!     Err(Error::PartMissing { path }) => {
//!         eprintln!("part not downloaded yet: {}", path.display());
//!     }
//!     Err(e) => eprintln!("merge failed: {}", e),
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// The main error type for assembly and discovery operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An underlying read, write, or create operation failed.
    ///
    /// This wraps [`std::io::Error`] and covers disk-full, permission
    /// denied, and device-removed conditions. The operation is not retried
    /// internally; retry policy belongs to the caller.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A split source path does not refer to a regular file.
    #[error("not a regular file: {path}")]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// The requested part count cannot produce non-empty parts.
    ///
    /// A split requires `1 <= part_count <= total_size` so that every part
    /// holds at least one byte.
    #[error("invalid part count {part_count} for a {total_size} byte source")]
    InvalidPartCount {
        /// The requested number of parts.
        part_count: u32,
        /// The byte length of the source file.
        total_size: u64,
    },

    /// A part file listed for a merge does not exist.
    ///
    /// Detected before the merge target is created or truncated, so a
    /// doomed merge writes zero bytes.
    #[error("part missing: expected at '{path}' (all parts must be present before a merge begins)")]
    PartMissing {
        /// The expected path of the missing part.
        path: PathBuf,
    },

    /// Discovery produced an empty or all-unwritable candidate set.
    ///
    /// This is a normal (if unwelcome) outcome on devices with no usable
    /// storage, not a crash condition. Removable media may appear later;
    /// discovery can simply be run again.
    #[error("no writable storage volume available")]
    NoWritableVolume,
}

impl Error {
    /// Returns the path associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::NotAFile { path } => Some(path),
            Error::PartMissing { path } => Some(path),
            _ => None,
        }
    }

    /// Returns `true` if the operation might succeed when tried again.
    ///
    /// - `PartMissing`: the caller can finish downloading the part
    /// - `NoWritableVolume`: removable media can appear between calls
    /// - `Io` (transient kinds only): `WouldBlock`, `Interrupted`, `TimedOut`
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::PartMissing { .. } => true,
            Error::NoWritableVolume => true,
            Error::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}

/// A specialized Result type for assembly and discovery operations.
pub type Result<T> = std::result::Result<T, Error>;
