//! Command implementations
//!
//! - `plumbing`: Low-level commands for direct object access (hash-object, cat-file)
//! - `porcelain`: User-facing commands for version control workflows (add, commit, log, etc.)
//!
//! Every command is an `impl Repository` block writing its output through the
//! repository's writer.

pub mod plumbing;
pub mod porcelain;
