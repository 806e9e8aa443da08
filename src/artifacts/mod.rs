//! Data structures and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `core`: Console output helpers (pager wrapper)
//! - `diff`: Snapshot comparison
//! - `ignore`: Ignore rules consulted by `add`
//! - `index`: Index file format (header, entries, checksum)
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, commit) and digests

pub mod branch;
pub mod core;
pub mod diff;
pub mod ignore;
pub mod index;
pub mod log;
pub mod objects;
