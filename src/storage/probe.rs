//! Live writability probing.
//!
//! Metadata flags alone cannot be trusted to answer "can I write here":
//! permission bits say nothing about a filesystem mounted read-only or a
//! card that was just ejected. The probe therefore checks the cheap
//! platform flag first and, when that is negative, falls back to actually
//! creating a marker file, writing a byte to it, and deleting it again.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Name of the marker file created by the fallback probe.
const MARKER_NAME: &str = ".fs-write-probe";

/// Returns `true` if the directory accepts writes.
///
/// A positive permission-bit check is accepted as-is; a negative one falls
/// through to [`marker_probe`], whose verdict is final.
pub(crate) fn is_writable(dir: &Path) -> bool {
    if writable_flag(dir) {
        return true;
    }
    marker_probe(dir)
}

/// The platform's fast writability flag: directory permission bits.
fn writable_flag(dir: &Path) -> bool {
    fs::metadata(dir)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

/// Create-write-delete probe.
///
/// Succeeds only if the whole create, write, delete sequence completes.
/// The marker is removed on every outcome where it exists; a leaked marker
/// is logged and tolerated, never an error.
pub(crate) fn marker_probe(dir: &Path) -> bool {
    let marker = dir.join(MARKER_NAME);
    let ok = write_marker(&marker).is_ok();
    if marker.exists() {
        if let Err(e) = fs::remove_file(&marker) {
            log::warn!(
                "failed to remove write probe marker {}: {}",
                marker.display(),
                e
            );
        }
    }
    ok
}

fn write_marker(marker: &Path) -> io::Result<()> {
    if marker.exists() {
        fs::remove_file(marker)?;
    }
    let mut file = File::create(marker)?;
    file.write_all(&[1u8])
}
