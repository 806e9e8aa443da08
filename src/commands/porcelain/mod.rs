//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit from the index
//! - `branch`: Create or list branches
//! - `checkout`: Switch the current branch
//! - `log`: Show the current branch's history
//! - `diff`: Compare the snapshots of two revisions
//! - `clone`: Copy the repository to a new directory

pub mod add;
pub mod branch;
pub mod checkout;
pub mod clone;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
