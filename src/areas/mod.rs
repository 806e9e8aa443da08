//! Core repository components
//!
//! - `database`: Content-addressable object store for blobs and commits
//! - `index`: Staging area for the next commit
//! - `refs`: Branch pointers and HEAD
//! - `repository`: Ties the areas together and carries per-run settings
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
