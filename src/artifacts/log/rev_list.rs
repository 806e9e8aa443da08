use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use derive_new::new;
use std::collections::HashSet;

/// Walk from a commit through its parents down to the root
///
/// A missing or malformed commit, or a digest seen twice, yields a single
/// `BrokenHistory` error and ends the walk.
#[derive(Clone, new)]
pub struct RevList<'d> {
    database: &'d Database,
    start: Option<ObjectId>,
}

impl<'d> IntoIterator for RevList<'d> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'d>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: self.start,
            visited: HashSet::new(),
        }
    }
}

pub struct RevListIntoIter<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        if !self.visited.insert(commit_oid.clone()) {
            return Some(Err(RepositoryError::BrokenHistory(format!(
                "commit {commit_oid} appears twice in its own history"
            ))
            .into()));
        }

        match self.database.load_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
