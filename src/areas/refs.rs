//! Branch references and HEAD
//!
//! Every branch is a file under `.trove/refs/`, named after the branch, holding
//! the hex digest of its tip commit. An empty file is a branch without commits.
//! Hierarchical names such as `feature/login` live in subdirectories.
//!
//! `HEAD` holds the bare name of the current branch. It never holds a digest.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::HashMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Prefix accepted in front of the branch name in `HEAD`
const SYMREF_PREFIX: &str = "ref: refs/";

/// Branch pointers manager
///
/// Writes take an exclusive advisory lock on the ref file. There is no
/// compare-and-swap: the last writer wins.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.trove`)
    path: Box<Path>,
}

impl Refs {
    /// Create the default branch without commits and point HEAD at it
    pub fn initialize(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.exists() {
            self.update_ref_file(&branch_path, "")?;
        }

        self.update_ref_file(&self.head_path(), branch_name.as_ref())
    }

    /// Name of the branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        let content = content.trim();
        let name = content.strip_prefix(SYMREF_PREFIX).unwrap_or(content);

        BranchName::try_parse(name.to_string())
            .with_context(|| format!("HEAD holds an invalid branch name {name:?}"))
    }

    /// Point HEAD at an existing branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        if !self.branch_exists(branch_name) {
            return Err(RepositoryError::UnknownBranch(branch_name.to_string()).into());
        }

        self.update_ref_file(&self.head_path(), branch_name.as_ref())?;
        tracing::info!(branch = %branch_name, "switched HEAD");

        Ok(())
    }

    /// Tip commit of a branch, `None` while it has no commits
    pub fn tip(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Err(RepositoryError::UnknownBranch(branch_name.to_string()).into());
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .map_err(|_| {
                RepositoryError::BrokenHistory(format!(
                    "branch {branch_name} points at {content:?}, which is not a digest"
                ))
                .into()
            })
    }

    /// Move a branch to a new tip
    pub fn advance(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branch_path(branch_name), oid.as_ref())?;
        tracing::debug!(branch = %branch_name, %oid, "advanced branch");

        Ok(())
    }

    /// Create a branch at the current branch's tip
    ///
    /// # Returns
    ///
    /// The tip the new branch starts at, `None` if the current branch has no
    /// commits yet.
    pub fn create_branch(&self, branch_name: BranchName) -> anyhow::Result<Option<ObjectId>> {
        if branch_name.is_head() {
            return Err(RepositoryError::InvalidBranchName(branch_name.to_string()).into());
        }

        let branch_path = self.branch_path(&branch_name);
        if branch_path.exists() {
            return Err(RepositoryError::BranchExists(branch_name.to_string()).into());
        }

        let current_tip = self.tip(&self.current_branch()?)?;
        let content = current_tip
            .as_ref()
            .map(|oid| oid.as_ref().to_string())
            .unwrap_or_default();
        self.update_ref_file(&branch_path, &content)?;

        tracing::info!(branch = %branch_name, tip = ?current_tip, "created branch");

        Ok(current_tip)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    /// All branches, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let refs_path = self.refs_path();

        let mut branches = WalkDir::new(&refs_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&refs_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    /// Map each tip commit to the branches pointing at it
    pub fn reverse_refs(&self) -> anyhow::Result<HashMap<ObjectId, Vec<BranchName>>> {
        Ok(self
            .list_branches()?
            .into_iter()
            .fold(HashMap::new(), |mut acc, branch_name| {
                if let Ok(Some(oid)) = self.tip(&branch_name) {
                    acc.entry(oid).or_insert_with(Vec::new).push(branch_name);
                }
                acc
            }))
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.refs_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }
}
