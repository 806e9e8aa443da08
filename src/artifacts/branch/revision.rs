use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use crate::errors::RepositoryError;
use anyhow::Context;

/// Represents a revision specification that can be used to identify commits.
///
/// Supports multiple formats:
/// - Branch names: `main`, `feature/new-feature`
/// - `HEAD` and its alias `@`: the currently checked-out branch
/// - Full digests: 64-character hexadecimal strings
/// - Abbreviated digests: 4-64 hexadecimal characters, resolved when no branch
///   with that name exists
/// - Parent notation: `<revision>^` (e.g., `main^`, `HEAD^`)
/// - Ancestor notation: `<revision>~<n>` (e.g., `main~3`)
///
/// Resolution yields `None` when the revision names a branch without commits
/// or walks past a root commit.
#[derive(Debug, Clone)]
pub enum Revision {
    /// A branch, `HEAD`, or a digest-like string (told apart during resolution)
    Ref(BranchName),
    /// The Nth ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    /// Resolve to a commit digest
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        self.resolve_with(repository, true)
    }

    /// Resolve to any object; plain digests may name blobs
    pub fn resolve_object(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        self.resolve_with(repository, false)
    }

    fn resolve_with(
        &self,
        repository: &Repository,
        commits_only: bool,
    ) -> anyhow::Result<Option<ObjectId>> {
        match self {
            Revision::Ref(name) => {
                if name.is_head() {
                    let current_branch = repository.refs().current_branch()?;
                    return repository.refs().tip(&current_branch);
                }

                if repository.refs().branch_exists(name) {
                    return repository.refs().tip(name);
                }

                if Self::looks_like_oid(name.as_ref()) {
                    Self::resolve_oid(name.as_ref(), repository, commits_only).map(Some)
                } else {
                    Err(RepositoryError::UnknownBranch(name.to_string()).into())
                }
            }
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    // past the root there is nothing left to step through
                    if oid.is_none() {
                        break;
                    }
                    oid = Self::resolve_commit_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(
        oid: Option<ObjectId>,
        repository: &Repository,
    ) -> anyhow::Result<Option<ObjectId>> {
        match oid {
            Some(oid) => Ok(repository.database().load_commit(&oid)?.parent().cloned()),
            None => Ok(None),
        }
    }

    fn resolve_oid(
        oid_str: &str,
        repository: &Repository,
        commits_only: bool,
    ) -> anyhow::Result<ObjectId> {
        let mut matches = repository.database().find_objects_by_prefix(oid_str)?;

        if commits_only && matches.len() > 1 {
            matches.retain(|oid| {
                repository
                    .database()
                    .get_object_type(oid)
                    .map(|object_type| object_type == ObjectType::Commit)
                    .unwrap_or(false)
            });
        }

        let oid = match matches.len() {
            0 => return Err(RepositoryError::NotFound(oid_str.to_string()).into()),
            1 => matches.remove(0),
            _ => return Err(RepositoryError::AmbiguousDigest(oid_str.to_string()).into()),
        };

        if commits_only {
            Self::validate_oid_is_commit(&oid, repository)?;
        }

        Ok(oid)
    }

    fn validate_oid_is_commit(oid: &ObjectId, repository: &Repository) -> anyhow::Result<()> {
        let obj_type = repository
            .database()
            .get_object_type(oid)
            .with_context(|| format!("object {} not found", oid))?;

        if obj_type != ObjectType::Commit {
            anyhow::bail!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                obj_type
            );
        }

        Ok(())
    }

    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(branch_name))
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        s.len() >= MIN_PREFIX_LENGTH
            && s.len() <= OBJECT_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}
