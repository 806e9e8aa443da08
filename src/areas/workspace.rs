use crate::areas::repository::REPOSITORY_DIR;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into one relative to the workspace root
    ///
    /// Absolute paths must lie inside the workspace; `.` components are dropped.
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(self.path.as_ref())
                .with_context(|| format!("{:?} is outside the repository", path))?
        } else {
            path
        };

        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(part) => relative.push(part),
                _ => anyhow::bail!("{:?} is outside the repository", path),
            }
        }

        Ok(relative)
    }

    /// Expand a workspace path into the files beneath it
    ///
    /// A file expands to itself. Anything inside the repository directory is
    /// never listed. Results are relative to the workspace root and sorted.
    pub fn list_files(&self, root_file_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = self.relative_path(root_file_path)?;
        let absolute_path = self.path.join(&root_file_path);

        if absolute_path.is_file() {
            return Ok(vec![root_file_path]);
        }
        if !absolute_path.is_dir() {
            return Err(RepositoryError::FileNotFound(root_file_path).into());
        }

        let mut files = WalkDir::new(&absolute_path)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let absolute_path = self.path.join(file_path);

        if !absolute_path.is_file() {
            return Err(RepositoryError::FileNotFound(file_path.to_path_buf()).into());
        }

        let content = std::fs::read(&absolute_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Copy the whole working tree, repository directory included, to `destination`
    ///
    /// # Returns
    ///
    /// The number of files copied
    pub fn copy_to(&self, destination: &Path) -> anyhow::Result<usize> {
        if destination.exists() {
            return Err(RepositoryError::DestinationExists(destination.to_path_buf()).into());
        }

        let destination_parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.canonicalize(),
            _ => std::env::current_dir(),
        }
        .with_context(|| format!("Parent of {:?} does not exist", destination))?;
        let source = self.path.canonicalize()?;

        if destination_parent.starts_with(&source) {
            anyhow::bail!(
                "Cannot clone {:?} into itself at {:?}",
                source,
                destination
            );
        }

        let mut copied = 0;
        for entry in WalkDir::new(&source) {
            let entry = entry?;
            let relative_path = entry.path().strip_prefix(&source)?;
            let target_path = destination.join(relative_path);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target_path)
                    .with_context(|| format!("Failed to create directory: {:?}", target_path))?;
            } else if entry.file_type().is_file() {
                std::fs::copy(entry.path(), &target_path)
                    .with_context(|| format!("Failed to copy file: {:?}", relative_path))?;
                copied += 1;
            }
        }

        tracing::info!(files = copied, destination = %destination.display(), "copied workspace");

        Ok(copied)
    }
}
