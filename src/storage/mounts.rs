//! Mount-table and volume-daemon config enumeration.
//!
//! The oldest enumeration tier: scan the system mount table for lines whose
//! device field carries a vendor block-device prefix, then cross-check the
//! collected mount points against the mount points a legacy volume daemon
//! declares in its config file. A mount survives only if both sources agree
//! on it; when the daemon config cannot be read at all, the cross-check is
//! dropped and the mount table stands alone.
//!
//! A typical mount table line:
//!
//! ```text
//! /dev/block/vold/179:1 /mnt/sdcard vfat rw,dirsync,nosuid 0 0
//! ```
//!
//! and the two recognized daemon config line shapes:
//!
//! ```text
//! dev_mount sdcard /mnt/sdcard:auto 1 /devices/platform/mmci
//! mount_point /mnt/external
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Collects mount-table candidates cross-checked against the daemon config.
///
/// The conventional default external root always seeds the list first.
pub(crate) fn mount_table_candidates(
    mounts_file: &Path,
    vold_files: &[PathBuf],
    device_prefixes: &[String],
    default_external: &Path,
) -> Vec<PathBuf> {
    let mounts = read_mounts(mounts_file, device_prefixes, default_external);
    match read_vold(vold_files, default_external) {
        Some(declared) => mounts
            .into_iter()
            .filter(|m| declared.contains(m))
            .collect(),
        None => {
            log::warn!(
                "no volume daemon config readable, keeping mount table candidates unfiltered"
            );
            mounts
        }
    }
}

/// Scans the mount table for vendor block-device mount points.
fn read_mounts(path: &Path, device_prefixes: &[String], default_external: &Path) -> Vec<PathBuf> {
    // some mount tables don't list the default path first, so seed it here
    let mut mounts = vec![default_external.to_path_buf()];
    let Ok(contents) = fs::read_to_string(path) else {
        log::debug!("mount table {} not readable", path.display());
        return mounts;
    };
    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        let Some(device) = fields.next() else {
            continue;
        };
        if !device_prefixes.iter().any(|p| device.starts_with(p.as_str())) {
            continue;
        }
        let Some(mount_point) = fields.next() else {
            continue;
        };
        let mount_point = PathBuf::from(mount_point);
        // the default path is already in the list
        if mount_point != default_external {
            mounts.push(mount_point);
        }
    }
    mounts
}

/// Reads the mount points a legacy volume daemon declares.
///
/// Tries each config location in order and parses the first one that is
/// readable. Returns `None` when no location can be read, which callers
/// treat as "no cross-check available".
fn read_vold(files: &[PathBuf], default_external: &Path) -> Option<Vec<PathBuf>> {
    let contents = files.iter().find_map(|f| fs::read_to_string(f).ok())?;
    let mut declared = vec![default_external.to_path_buf()];
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("dev_mount") {
            // dev_mount <label> <mount_point>[:<part>] ...
            let fields: Vec<&str> = rest.split_whitespace().collect();
            if fields.len() < 2 {
                continue;
            }
            let mount_point = match fields[1].find(':') {
                Some(colon) => &fields[1][..colon],
                None => fields[1],
            };
            push_declared(&mut declared, mount_point, default_external);
        } else if let Some(rest) = line.strip_prefix("mount_point") {
            push_declared(&mut declared, rest.trim(), default_external);
        }
    }
    Some(declared)
}

fn push_declared(declared: &mut Vec<PathBuf>, mount_point: &str, default_external: &Path) {
    let mount_point = PathBuf::from(mount_point);
    if mount_point != default_external {
        declared.push(mount_point);
    }
}
