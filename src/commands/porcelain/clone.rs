use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Copy the working tree and all repository state to `destination`
    pub fn clone_to(&self, destination: &Path) -> anyhow::Result<()> {
        let copied = self.workspace().copy_to(destination)?;

        writeln!(
            self.writer(),
            "Cloned repository to {} ({} files)",
            destination.display(),
            copied
        )?;

        Ok(())
    }
}
