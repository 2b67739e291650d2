//! # filestitch
//!
//! Segmented file assembly and writable-storage discovery for download
//! managers.
//!
//! This crate provides the two storage-facing building blocks of a
//! segmented-download pipeline:
//!
//! - [`assemble`] splits a file into N contiguous byte-range parts and
//!   merges an ordered list of part files back into one byte-exact output.
//! - [`storage`] enumerates candidate writable storage roots across
//!   heterogeneous device layouts, deduplicates aliased mounts, and
//!   validates writability with a live probe.
//!
//! The two components never call each other; an orchestrating caller asks
//! the resolver for a destination root, builds target and part paths under
//! it, and then drives the assembler.
//!
//! ## Splitting and Merging
//!
//! ```rust,no_run
//! use filestitch::{merge, split, Result};
//!
//! fn main() -> Result<()> {
//!     // Split into 4 parts named movie.mp4.0.part .. movie.mp4.3.part
//!     let parts = split("movie.mp4", 4)?;
//!
//!     // Merge them back, in index order, into a byte-exact copy
//!     let paths: Vec<_> = parts.iter().map(|p| p.path.clone()).collect();
//!     let written = merge("movie-restored.mp4", &paths)?;
//!     assert_eq!(written, parts.iter().map(|p| p.length).sum::<u64>());
//!     Ok(())
//! }
//! ```
//!
//! ## Finding a Writable Destination
//!
//! ```rust,no_run
//! use filestitch::storage::DiscoveryContext;
//!
//! let context = DiscoveryContext::new();
//! match context.default_destination() {
//!     Ok(volume) => println!("downloading to {}", volume.path.display()),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`](Result) with the crate-wide
//! [`Error`] enum. A failed split or merge leaves its partial output files
//! in place; callers own cleanup and retry policy.

pub mod assemble;
pub mod checksum;
pub mod error;
pub mod storage;

pub use assemble::{FilePart, SplitPlan, merge, part_path, split};
pub use error::{Error, Result};
pub use storage::{DiscoveryContext, StorageVolume};

/// Size of the stack-local buffer used by every sequential copy loop.
///
/// Split, merge, and checksum streaming all move data through a buffer of
/// this size, bounding memory use regardless of file size.
pub const COPY_BUFFER_SIZE: usize = 8 * 1024;
