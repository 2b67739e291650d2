//! Splitting a source file into ordered part files.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use super::{FilePart, SplitPlan, part_path};
use crate::{COPY_BUFFER_SIZE, Error, Result};

/// Splits a source file into `part_count` ordered part files.
///
/// The source is read sequentially, once, and its bytes are written into
/// successive part files named with the `<source>.<index>.part` convention.
/// Every part except the last is `total_size / part_count` bytes long; the
/// last part absorbs the remainder so the parts sum to the source length
/// exactly. Each part file is created fresh, truncating any leftover from a
/// previous run, so repeating a split never accumulates stale bytes.
///
/// The source file is left untouched.
///
/// # Errors
///
/// - [`Error::NotAFile`] if `source` is not a regular file
/// - [`Error::InvalidPartCount`] unless `1 <= part_count <= source length`
/// - [`Error::Io`] if the source cannot be opened or a part cannot be
///   created or written; parts written before the failure are left in
///   place for the caller to clean up
///
/// # Example
///
/// ```rust,no_run
/// use filestitch::split;
///
/// # fn main() -> filestitch::Result<()> {
/// let parts = split("movie.mp4", 4)?;
/// assert_eq!(parts.len(), 4);
/// assert_eq!(parts[0].path.to_str().unwrap(), "movie.mp4.0.part");
/// # Ok(())
/// # }
/// ```
pub fn split(source: impl AsRef<Path>, part_count: u32) -> Result<Vec<FilePart>> {
    let source = source.as_ref();
    let meta = fs::metadata(source)?;
    if !meta.is_file() {
        return Err(Error::NotAFile {
            path: source.to_path_buf(),
        });
    }
    let plan = SplitPlan::new(meta.len(), part_count)?;

    let mut reader = File::open(source)?;
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut parts = Vec::with_capacity(part_count as usize);

    for index in 0..part_count {
        let target_len = plan.part_len(index);
        let path = part_path(source, index);
        log::debug!(
            "writing part {} of {} ({} bytes) to {}",
            index,
            part_count,
            target_len,
            path.display()
        );

        let mut out = File::create(&path)?;
        let mut remaining = target_len;
        while remaining > 0 {
            let want = remaining.min(buffer.len() as u64) as usize;
            let n = reader.read(&mut buffer[..want])?;
            if n == 0 {
                // source shrank under us mid-read
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("source ended early while writing part {}", index),
                )));
            }
            out.write_all(&buffer[..n])?;
            remaining -= n as u64;
        }

        parts.push(FilePart {
            index,
            path,
            length: target_len,
        });
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_split_part_sizes_and_content() {
        let dir = TempDir::new().unwrap();
        let data: Vec<u8> = (0..=9u8).collect();
        let source = write_source(&dir, "ten.bin", &data);

        let parts = split(&source, 3).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].length, 3);
        assert_eq!(parts[1].length, 3);
        assert_eq!(parts[2].length, 4);

        assert_eq!(fs::read(&parts[0].path).unwrap(), &data[0..3]);
        assert_eq!(fs::read(&parts[1].path).unwrap(), &data[3..6]);
        assert_eq!(fs::read(&parts[2].path).unwrap(), &data[6..10]);
    }

    #[test]
    fn test_split_single_part() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "one.bin", b"payload");

        let parts = split(&source, 1).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(fs::read(&parts[0].path).unwrap(), b"payload");
    }

    #[test]
    fn test_split_leaves_source_intact() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "keep.bin", b"do not delete");

        split(&source, 2).unwrap();
        assert_eq!(fs::read(&source).unwrap(), b"do not delete");
    }

    #[test]
    fn test_split_truncates_stale_parts() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "re.bin", b"abcdef");

        // leave an oversized stale part from a "previous run"
        let stale = part_path(&source, 0);
        fs::write(&stale, vec![0xFFu8; 100]).unwrap();

        let parts = split(&source, 2).unwrap();
        assert_eq!(fs::read(&parts[0].path).unwrap(), b"abc");
        assert_eq!(fs::metadata(&stale).unwrap().len(), 3);
    }

    #[test]
    fn test_split_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = split(dir.path().join("absent.bin"), 2).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_split_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = split(dir.path(), 2).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
    }

    #[test]
    fn test_split_rejects_bad_part_count() {
        let dir = TempDir::new().unwrap();
        let source = write_source(&dir, "tiny.bin", b"ab");

        assert!(matches!(
            split(&source, 0),
            Err(Error::InvalidPartCount { .. })
        ));
        assert!(matches!(
            split(&source, 3),
            Err(Error::InvalidPartCount { .. })
        ));
    }
}
