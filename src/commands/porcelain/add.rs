use crate::areas::repository::{REPOSITORY_DIR, Repository};
use crate::artifacts::ignore::{IgnorePredicate, IgnoreRules};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::path::{Component, Path, PathBuf};

/// Per-file outcome of an `add` batch
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub staged: Vec<(PathBuf, ObjectId)>,
    pub skipped: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl AddReport {
    /// True when every requested path was found
    pub fn is_success(&self) -> bool {
        self.missing.is_empty()
    }
}

impl Repository {
    /// Stage files and directories
    ///
    /// Directories expand to every file beneath them. A path that does not exist
    /// lands in the report's `missing` list and the rest of the batch is still
    /// staged. Ignored paths are skipped.
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<AddReport> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let default_rules;
        let ignore: &dyn IgnorePredicate = match self.custom_ignore() {
            Some(ignore) => ignore,
            None => {
                default_rules = IgnoreRules::load(&self.ignore_path())?;
                &default_rules
            }
        };

        let mut report = AddReport::default();

        for path in paths {
            let files = match self.workspace().list_files(Path::new(path)) {
                Ok(files) => files,
                Err(err) => match RepositoryError::find(&err) {
                    Some(RepositoryError::FileNotFound(_)) => {
                        tracing::warn!(path, "cannot stage missing path");
                        report.missing.push(PathBuf::from(path));
                        continue;
                    }
                    _ => return Err(err),
                },
            };

            for file in files {
                if Self::is_repository_path(&file) || ignore.should_ignore(&file) {
                    writeln!(self.writer(), "Skipping ignored file: {}", file.display())?;
                    report.skipped.push(file);
                    continue;
                }

                let data = self.workspace().read_file(&file)?;
                let blob_id = self.database().put(&data)?;

                tracing::debug!(path = %file.display(), oid = %blob_id, "staged file");
                index.upsert(file.clone(), blob_id.clone());
                report.staged.push((file, blob_id));
            }
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        writeln!(
            self.writer(),
            "Added {} file(s) to the staging area",
            report.staged.len()
        )?;

        Ok(report)
    }

    fn is_repository_path(path: &Path) -> bool {
        matches!(
            path.components().next(),
            Some(Component::Normal(first)) if first == REPOSITORY_DIR
        )
    }
}
