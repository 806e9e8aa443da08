use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Snapshot the index as a new commit on the current branch
    ///
    /// The new snapshot carries over every file of the parent commit, with the
    /// staged entries replacing or extending them. The index is emptied
    /// afterwards. With nothing staged this fails with `EmptyCommit` and leaves
    /// the branch and index untouched.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        if index.is_empty() {
            return Err(RepositoryError::EmptyCommit.into());
        }

        let branch = self.refs().current_branch()?;
        let parent = self.refs().tip(&branch)?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let files = self.snapshot_files(parent.as_ref(), index.entries())?;
        let commit = Commit::try_build(
            message.trim().to_string(),
            files,
            parent,
            self.config().commit_timestamp(),
        )?;
        let commit_id = self.database().store(&commit)?;
        self.refs().advance(&branch, &commit_id)?;

        index.clear();
        index.write_updates()?;

        tracing::info!(%branch, oid = %commit_id, files = commit.files().len(), "created commit");

        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            branch,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }

    /// Parent files in their recorded order, overlaid with the staged entries
    fn snapshot_files<'a>(
        &self,
        parent: Option<&ObjectId>,
        staged: impl Iterator<Item = &'a IndexEntry>,
    ) -> anyhow::Result<Vec<IndexEntry>> {
        let mut files = match parent {
            Some(parent) => self.database().load_commit(parent)?.files().to_vec(),
            None => vec![],
        };

        for entry in staged {
            match files.iter_mut().find(|file| file.has_path(&entry.path)) {
                Some(file) => file.oid = entry.oid.clone(),
                None => files.push(entry.clone()),
            }
        }

        Ok(files)
    }
}
