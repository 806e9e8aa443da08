//! Snapshot comparison
//!
//! - `snapshot_diff`: File-level diff of two commits (added, removed, modified)

pub mod snapshot_diff;
