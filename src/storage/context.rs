//! Discovery context and the tiered enumeration walk.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use sysinfo::Disks;

use super::env::{EnvConfig, environment_candidates};
use super::mounts::mount_table_candidates;
use super::probe;
use super::volume::{CapacitySource, StorageVolume, SystemCapacity, dedup_by_fingerprint};
use crate::{Error, Result};

const DEFAULT_MOUNTS_FILE: &str = "/proc/mounts";
const DEFAULT_VOLD_FILES: [&str; 2] = ["/etc/vold.fstab", "/etc/vold.conf"];
const DEFAULT_DEVICE_PREFIXES: [&str; 2] = ["/dev/block/vold/", "/dev/block//vold/"];
const DEFAULT_EXTERNAL_ROOT: &str = "/storage/sdcard0";

/// Configuration for a storage discovery run.
///
/// The defaults query the live system: the platform disk inventory for the
/// volume-manager tier, the process environment for the environment tier,
/// and `/proc/mounts` plus the conventional volume-daemon config locations
/// for the mount-table tier. Every input has a builder-style override, so
/// embedders can redirect discovery at fixture files and tests never touch
/// global state.
///
/// # Example
///
/// ```rust,no_run
/// use filestitch::storage::DiscoveryContext;
///
/// let context = DiscoveryContext::new()
///     .with_default_external("/media/primary");
/// let volumes = context.discover();
/// ```
pub struct DiscoveryContext {
    /// Tier-1 override; `None` queries the platform disk inventory.
    volume_paths: Option<Vec<PathBuf>>,
    /// Tier-2 override; `None` reads the process environment per call.
    env: Option<EnvConfig>,
    mounts_file: PathBuf,
    vold_files: Vec<PathBuf>,
    device_prefixes: Vec<String>,
    default_external: PathBuf,
    capacity: Box<dyn CapacitySource>,
}

impl DiscoveryContext {
    /// Creates a context with live-system defaults.
    pub fn new() -> Self {
        Self {
            volume_paths: None,
            env: None,
            mounts_file: PathBuf::from(DEFAULT_MOUNTS_FILE),
            vold_files: DEFAULT_VOLD_FILES.iter().map(PathBuf::from).collect(),
            device_prefixes: DEFAULT_DEVICE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            default_external: PathBuf::from(DEFAULT_EXTERNAL_ROOT),
            capacity: Box::new(SystemCapacity),
        }
    }

    /// Replaces the volume-manager tier with an explicit mount path list.
    ///
    /// An empty list disables the tier, letting discovery fall through to
    /// the environment tier.
    pub fn with_volume_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.volume_paths = Some(paths);
        self
    }

    /// Supplies environment values directly instead of reading the
    /// process environment.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    /// Points the mount-table tier at a different mount table.
    pub fn with_mounts_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mounts_file = path.into();
        self
    }

    /// Replaces the volume-daemon config locations, tried in order.
    pub fn with_vold_files(mut self, paths: Vec<PathBuf>) -> Self {
        self.vold_files = paths;
        self
    }

    /// Replaces the vendor block-device prefixes the mount scan matches.
    pub fn with_device_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.device_prefixes = prefixes;
        self
    }

    /// Replaces the conventional default external root.
    pub fn with_default_external(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_external = path.into();
        self
    }

    /// Replaces the capacity source used for dedup fingerprints.
    pub fn with_capacity_source(mut self, capacity: impl CapacitySource + 'static) -> Self {
        self.capacity = Box::new(capacity);
        self
    }

    /// Enumerates writable storage volumes, in discovery order.
    ///
    /// Walks the enumeration tiers newest-first and takes the candidates of
    /// the first tier that yields any, then keeps only candidates that
    /// exist as directories and pass the live writability probe, and
    /// finally collapses capacity-fingerprint aliases (shorter path wins).
    ///
    /// No tier failure is fatal. An empty result means no writable storage
    /// is currently available; callers report that rather than treating it
    /// as a crash. Results are recomputed from scratch on every call since
    /// removable media can come and go.
    pub fn discover(&self) -> Vec<StorageVolume> {
        let mut volumes = Vec::new();
        for path in self.candidate_paths() {
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            if !probe::is_writable(&path) {
                log::debug!("candidate {} failed the writability probe", path.display());
                continue;
            }
            let (total_space, usable_space) = self.capacity.capacity(&path).unwrap_or((0, 0));
            volumes.push(StorageVolume {
                path,
                total_space,
                usable_space,
                writable: true,
            });
        }
        dedup_by_fingerprint(volumes)
    }

    /// Picks the default destination: the first discovered volume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoWritableVolume`] when discovery comes back empty.
    pub fn default_destination(&self) -> Result<StorageVolume> {
        self.discover().into_iter().next().ok_or(Error::NoWritableVolume)
    }

    /// Runs the ordered strategy list and returns the first tier's yield.
    fn candidate_paths(&self) -> Vec<PathBuf> {
        let tiers: [(&str, fn(&Self) -> Vec<PathBuf>); 3] = [
            ("volume-manager", Self::volume_manager_candidates),
            ("environment", Self::environment_tier_candidates),
            ("mount-table", Self::mount_table_tier_candidates),
        ];
        for (name, tier) in tiers {
            let candidates = tier(self);
            if !candidates.is_empty() {
                log::debug!(
                    "storage discovery: {} tier yielded {} candidate(s)",
                    name,
                    candidates.len()
                );
                return candidates;
            }
        }
        Vec::new()
    }

    fn volume_manager_candidates(&self) -> Vec<PathBuf> {
        match &self.volume_paths {
            Some(paths) => paths.clone(),
            None => {
                let disks = Disks::new_with_refreshed_list();
                disks
                    .list()
                    .iter()
                    .map(|d| d.mount_point().to_path_buf())
                    .collect()
            }
        }
    }

    fn environment_tier_candidates(&self) -> Vec<PathBuf> {
        let env = match &self.env {
            Some(env) => env.clone(),
            None => EnvConfig::from_process_env(),
        };
        // without any configured value the tier has nothing to enumerate
        if env.is_empty() {
            return Vec::new();
        }
        environment_candidates(&env, &self.default_external)
    }

    fn mount_table_tier_candidates(&self) -> Vec<PathBuf> {
        mount_table_candidates(
            &self.mounts_file,
            &self.vold_files,
            &self.device_prefixes,
            &self.default_external,
        )
    }
}

impl Default for DiscoveryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiscoveryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryContext")
            .field("volume_paths", &self.volume_paths)
            .field("env", &self.env)
            .field("mounts_file", &self.mounts_file)
            .field("vold_files", &self.vold_files)
            .field("device_prefixes", &self.device_prefixes)
            .field("default_external", &self.default_external)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_volume_paths_win_over_later_tiers() {
        let dir = tempfile::tempdir().unwrap();
        let context = DiscoveryContext::new()
            .with_volume_paths(vec![dir.path().to_path_buf()])
            .with_env(EnvConfig {
                external: Some("/nonexistent/elsewhere".into()),
                ..Default::default()
            });

        let volumes = context.discover();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].path, dir.path());
        assert!(volumes[0].writable);
    }

    #[test]
    fn test_empty_volume_list_falls_through_to_environment() {
        let dir = tempfile::tempdir().unwrap();
        let context = DiscoveryContext::new()
            .with_volume_paths(Vec::new())
            .with_env(EnvConfig {
                external: Some(dir.path().to_string_lossy().into_owned()),
                ..Default::default()
            });

        let volumes = context.discover();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].path, dir.path());
    }

    #[test]
    fn test_no_tier_yield_is_an_empty_result_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // all tiers redirected at nothing usable
        let context = DiscoveryContext::new()
            .with_volume_paths(Vec::new())
            .with_env(EnvConfig::default())
            .with_mounts_file(dir.path().join("no-mounts"))
            .with_vold_files(vec![dir.path().join("no-vold")])
            .with_default_external(dir.path().join("no-external"));

        assert!(context.discover().is_empty());
        assert!(matches!(
            context.default_destination(),
            Err(Error::NoWritableVolume)
        ));
    }
}
