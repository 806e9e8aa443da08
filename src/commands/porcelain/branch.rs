use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;

impl Repository {
    /// Create a branch at the current tip, or list branches when no name is given
    pub fn branch(&mut self, branch_name: Option<&str>) -> anyhow::Result<()> {
        match branch_name {
            Some(branch_name) => self.create_branch(branch_name),
            None => self.list_branches(),
        }
    }

    fn create_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let start = self.refs().create_branch(branch_name.clone())?;

        match start {
            Some(oid) => writeln!(
                self.writer(),
                "Created branch {} at {}",
                branch_name,
                oid.to_short_oid()
            )?,
            None => writeln!(self.writer(), "Created branch {} (no commits yet)", branch_name)?,
        }

        Ok(())
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        self.refresh_current_branch()?;

        for branch_name in self.refs().list_branches()? {
            if branch_name == *self.current_branch() {
                writeln!(self.writer(), "* {}", branch_name.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch_name)?;
            }
        }

        Ok(())
    }
}
