use crate::areas::repository::{REPOSITORY_DIR, Repository};
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            self.refresh_current_branch()?;
            writeln!(
                self.writer(),
                "Reinitialized existing trove repository in {}",
                self.repository_path().display()
            )?;

            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .trove/objects directory")?;

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .trove/refs directory")?;

        self.refs()
            .initialize(&BranchName::default_branch())
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let index = index.lock().await;
        // create the index file if it does not exist
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .trove/index file")?;
        }

        if !self.ignore_path().exists() {
            fs::write(self.ignore_path(), format!("{REPOSITORY_DIR}\n"))
                .context("Failed to create .trove/ignore file")?;
        }

        self.refresh_current_branch()?;
        tracing::info!(path = %self.path().display(), "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty trove repository in {}",
            self.repository_path().display()
        )?;

        Ok(())
    }
}
