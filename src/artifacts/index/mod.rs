//! Index file format
//!
//! The index (staging area) stores the paths and blob digests that the next
//! commit will snapshot, in the order they were staged.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "TIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Each entry padded to 8-byte alignment
//!   - Contains the raw digest and the path
//!
//! Checksum (32 bytes):
//!   - SHA-256 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-256 checksum in bytes
pub const CHECKSUM_SIZE: usize = 32;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "TIDX";

/// Index file format version
pub const VERSION: u32 = 1;
