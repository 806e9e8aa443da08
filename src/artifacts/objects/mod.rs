//! Object types and operations
//!
//! Everything in the store is an object identified by the SHA-256 digest of its
//! stored bytes. There are two kinds:
//!
//! - **Blob**: File content (raw bytes, stored verbatim)
//! - **Commit**: Snapshot of staged entries with message, timestamp and parent
//!
//! Blobs are stored exactly as read from the working tree, so a blob's digest is
//! the digest of the file content. Commits carry a `commit <size>\0` header.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-256 digest in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;

/// Length of an abbreviated digest for display
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Shortest prefix accepted when resolving abbreviated digests
pub const MIN_PREFIX_LENGTH: usize = 4;
