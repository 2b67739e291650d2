//! Segment assembler: split a file into ordered parts, merge parts back.
//!
//! A split divides one source file into N contiguous byte ranges, each
//! materialized as its own part file; a merge concatenates an ordered part
//! list into a single target whose bytes equal the original exactly. Both
//! operations are stateless, blocking, single-shot calls that stream data
//! through a fixed 8 KiB buffer, so memory use is bounded regardless of
//! file size.
//!
//! # Part Naming
//!
//! Part files follow the `<path>.<index>.part` convention, index zero-based
//! with no zero-padding (`movie.mp4.0.part`, `movie.mp4.1.part`, ...).
//! Downstream reassembly tooling relies on this shape; [`part_path`] is the
//! one place it is produced.
//!
//! # Failure Behavior
//!
//! Neither operation rolls back on failure. A failed split leaves the parts
//! written so far on disk; a failed merge leaves a partial target. Callers
//! must treat any output of a failed call as invalid and either clean up or
//! retry from scratch. A merge does validate that every listed part exists
//! before it creates or truncates the target, so a merge doomed by a
//! missing part writes nothing at all.

mod merge;
mod plan;
mod split;

pub use merge::merge;
pub use plan::{FilePart, SplitPlan, part_path};
pub use split::split;
