//! Storage volume resolver: find writable roots for download output.
//!
//! Devices expose external storage in wildly different ways depending on
//! platform generation: a queryable disk inventory on modern systems,
//! environment-style configuration on others, and on the oldest layouts
//! only a mount table cross-checked against a volume-daemon config file.
//! This module walks those enumeration tiers newest-first, takes the first
//! tier that yields candidates, then filters the candidates down to
//! directories that demonstrably accept writes and deduplicates mounts
//! that alias the same physical device.
//!
//! Discovery is recomputed on every call. Removable media can appear or
//! disappear between calls, so nothing is cached.
//!
//! # Example
//!
//! ```rust,no_run
//! use filestitch::storage::DiscoveryContext;
//!
//! let context = DiscoveryContext::new();
//! let volumes = context.discover();
//! if volumes.is_empty() {
//!     eprintln!("no writable storage available");
//! }
//! for volume in &volumes {
//!     println!(
//!         "{} ({} of {} bytes free)",
//!         volume.path.display(),
//!         volume.usable_space,
//!         volume.total_space,
//!     );
//! }
//! ```
//!
//! Callers pick the first entry as the default destination; the rest are
//! alternatives. [`DiscoveryContext::default_destination`] does the pick
//! and turns an empty result into [`Error::NoWritableVolume`].
//!
//! [`Error::NoWritableVolume`]: crate::Error::NoWritableVolume

mod context;
mod env;
mod mounts;
mod probe;
mod volume;

pub use context::DiscoveryContext;
pub use env::EnvConfig;
pub use volume::{CapacitySource, StorageVolume, SystemCapacity};
