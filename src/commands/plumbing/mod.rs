//! Plumbing commands (low-level object access)
//!
//! ## Commands
//!
//! - `hash-object`: Compute a file's digest and optionally store it
//! - `cat-file`: Print a stored object's content or type

pub mod cat_file;
pub mod hash_object;
