//! Storage volume records, capacity lookup, and fingerprint dedup.

use std::path::{Path, PathBuf};

use sysinfo::Disks;

/// A candidate writable root directory.
///
/// The `(total_space, usable_space)` pair doubles as a dedup fingerprint:
/// two directories reporting identical capacity metrics are taken to be
/// aliases of the same physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageVolume {
    /// Absolute root path.
    pub path: PathBuf,
    /// Total capacity of the backing filesystem in bytes.
    pub total_space: u64,
    /// Currently usable capacity in bytes.
    pub usable_space: u64,
    /// Result of the live writability probe for this root.
    pub writable: bool,
}

impl StorageVolume {
    /// Returns the capacity fingerprint used for alias detection.
    pub fn fingerprint(&self) -> (u64, u64) {
        (self.total_space, self.usable_space)
    }
}

/// Source of capacity metrics for a directory.
///
/// Abstracted so discovery can be exercised against fixture directories
/// with known fingerprints; production code uses [`SystemCapacity`].
pub trait CapacitySource {
    /// Returns `(total, usable)` bytes of the filesystem holding `path`,
    /// or `None` when no backing filesystem can be identified.
    fn capacity(&self, path: &Path) -> Option<(u64, u64)>;
}

/// Capacity source backed by the platform disk inventory.
///
/// Maps a directory to the disk whose mount point is its longest prefix,
/// so nested paths resolve to the filesystem that actually holds them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCapacity;

impl CapacitySource for SystemCapacity {
    fn capacity(&self, path: &Path) -> Option<(u64, u64)> {
        let disks = Disks::new_with_refreshed_list();
        let mut best: Option<(usize, (u64, u64))> = None;
        for disk in disks.list() {
            let mount = disk.mount_point();
            if !path.starts_with(mount) {
                continue;
            }
            let depth = mount.components().count();
            if best.is_none_or(|(d, _)| depth > d) {
                best = Some((depth, (disk.total_space(), disk.available_space())));
            }
        }
        best.map(|(_, capacity)| capacity)
    }
}

/// Removes volumes whose fingerprint collides with an earlier entry.
///
/// The shorter path wins a collision and stays in the earlier entry's
/// position, keeping the canonical, non-nested mount and preserving
/// discovery order. Volumes with an unknown fingerprint of `(0, 0)` are
/// never treated as aliases of each other.
pub(crate) fn dedup_by_fingerprint(volumes: Vec<StorageVolume>) -> Vec<StorageVolume> {
    let mut kept: Vec<StorageVolume> = Vec::with_capacity(volumes.len());
    for candidate in volumes {
        if kept.iter().any(|v| v.path == candidate.path) {
            continue;
        }
        let fingerprint = candidate.fingerprint();
        if fingerprint != (0, 0) {
            if let Some(existing) = kept.iter_mut().find(|v| v.fingerprint() == fingerprint) {
                if candidate.path.as_os_str().len() < existing.path.as_os_str().len() {
                    *existing = candidate;
                }
                continue;
            }
        }
        kept.push(candidate);
    }
    kept
}
