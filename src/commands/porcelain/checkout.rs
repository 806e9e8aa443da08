use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Switch HEAD to another branch
    ///
    /// Only the branch pointer moves. Working-tree files and the index are left
    /// exactly as they are.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let target = BranchName::try_parse(target.to_string())?;
        let current = self.refs().current_branch()?;

        if target == current {
            writeln!(self.writer(), "Already on '{}'", target)?;
            return Ok(());
        }

        self.refs().set_head(&target)?;
        self.refresh_current_branch()?;

        writeln!(self.writer(), "Switched to branch '{}'", target)?;

        Ok(())
    }
}
