//! Merging ordered part files into a single target.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::{COPY_BUFFER_SIZE, Error, Result};

/// Merges an ordered list of part files into one target file.
///
/// The parts are streamed, in the order given, as one logical concatenated
/// byte stream into the target. On success the target's length equals the
/// sum of the part lengths and its content is the exact concatenation of
/// the parts. Callers must supply parts in index order to reconstruct the
/// original file; the order given is the order written.
///
/// Every listed part is checked for existence before the target is created
/// or truncated, so a merge doomed by a missing part writes zero bytes and
/// leaves any pre-existing target untouched.
///
/// Returns the total number of bytes written.
///
/// # Errors
///
/// - [`Error::PartMissing`] if any listed part does not exist; detected
///   up front, before the target is touched
/// - [`Error::Io`] if a read or write fails mid-merge; the partial target
///   is left in place and must be treated as untrustworthy
///
/// # Example
///
/// ```rust,no_run
/// use filestitch::merge;
///
/// # fn main() -> filestitch::Result<()> {
/// let written = merge(
///     "movie.mp4",
///     &["movie.mp4.0.part", "movie.mp4.1.part", "movie.mp4.2.part"],
/// )?;
/// println!("reassembled {} bytes", written);
/// # Ok(())
/// # }
/// ```
pub fn merge<P: AsRef<Path>>(target: impl AsRef<Path>, ordered_parts: &[P]) -> Result<u64> {
    let target = target.as_ref();

    // Validate the whole list before the target is created or truncated.
    for part in ordered_parts {
        let part = part.as_ref();
        let is_file = fs::metadata(part).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            log::debug!("merge aborted, part {} does not exist", part.display());
            return Err(Error::PartMissing {
                path: part.to_path_buf(),
            });
        }
    }

    let mut out = File::create(target)?;
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    for part in ordered_parts {
        let part = part.as_ref();
        // a part vanishing between validation and open is still a missing part
        let mut reader = File::open(part).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::PartMissing {
                    path: part.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            out.write_all(&buffer[..n])?;
            total += n as u64;
        }
    }

    Ok(total)
}
