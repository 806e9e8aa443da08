//! Repository error conditions
//!
//! Every failure the core can report is a distinct variant here. Commands return
//! `anyhow::Result` like the rest of the crate, so these travel inside an
//! `anyhow::Error` and are recovered with `downcast_ref::<RepositoryError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No object is stored under the requested digest.
    #[error("object {0} not found")]
    NotFound(String),

    /// The stored bytes no longer hash to the digest they are filed under.
    #[error("object {0} is corrupt: content does not match its digest")]
    CorruptObject(ObjectId),

    #[error("branch '{0}' does not exist")]
    UnknownBranch(String),

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    /// Commit requested with nothing staged.
    #[error("nothing to commit: the index is empty")]
    EmptyCommit,

    #[error("index file is corrupt: {0}")]
    CorruptIndex(String),

    /// A ref or parent link points at something that is not a readable commit.
    #[error("broken history: {0}")]
    BrokenHistory(String),

    #[error("{} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// A revision resolved to a branch with no commits yet.
    #[error("'{0}' has no commits yet")]
    NoCommits(String),

    #[error("short object id {0} is ambiguous")]
    AmbiguousDigest(String),

    #[error("not a trove repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("destination {} already exists", .0.display())]
    DestinationExists(PathBuf),
}

impl RepositoryError {
    /// Look for a repository error anywhere in an `anyhow` chain.
    pub fn find(error: &anyhow::Error) -> Option<&RepositoryError> {
        error.chain().find_map(|cause| cause.downcast_ref::<RepositoryError>())
    }
}
