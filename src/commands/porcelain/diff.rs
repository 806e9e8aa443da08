use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::snapshot_diff::{ChangeType, DiffFilter, SnapshotDiff};
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepositoryError;
use colored::Colorize;

impl Repository {
    /// Compare the snapshots two revisions point at
    ///
    /// Fails with `NoCommits` when either side has no commit to compare.
    pub fn diff(&self, old: &str, new: &str, filter: DiffFilter) -> anyhow::Result<SnapshotDiff> {
        let old_commit = self.load_revision_commit(old)?;
        let new_commit = self.load_revision_commit(new)?;

        let diff = SnapshotDiff::compare(&old_commit, &new_commit);

        writeln!(self.writer(), "{}", format!("Diff between {old} and {new}:").bold())?;
        for (path, change) in diff.filtered(filter) {
            let label = format!("{}:", change.label());
            let label = match change {
                ChangeType::Added(_) => label.green(),
                ChangeType::Removed(_) => label.red(),
                ChangeType::Modified { .. } => label.yellow(),
            };

            writeln!(self.writer(), "{} {}", label, path.display())?;
        }

        Ok(diff)
    }

    fn load_revision_commit(&self, revision: &str) -> anyhow::Result<Commit> {
        let oid = Revision::try_parse(revision)?
            .resolve(self)?
            .ok_or_else(|| RepositoryError::NoCommits(revision.to_string()))?;

        self.database().load_commit(&oid)
    }
}
