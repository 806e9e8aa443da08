//! trove: a minimal version-control core
//!
//! Content-addressable object storage, a staging index, branch references with
//! a symbolic HEAD, a single-parent commit graph, and snapshot diffs.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
pub mod telemetry;
