use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
    pub abbrev_commit: bool,
    pub decorate: bool,
}

impl Repository {
    /// Show the current branch's history, newest first
    ///
    /// A branch without commits prints nothing.
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        self.refresh_current_branch()?;
        let tip = self.refs().tip(&self.current_branch())?;

        let reverse_refs = if opts.decorate {
            self.refs().reverse_refs()?
        } else {
            HashMap::new()
        };

        for item in RevList::new(self.database(), tip) {
            let (commit_oid, commit) = item?;
            let decoration = self.commit_decoration(&commit_oid, &reverse_refs);

            if opts.oneline {
                self.show_commit_oneline(&commit_oid, &commit, opts.abbrev_commit, &decoration)?;
            } else {
                self.show_commit_medium(&commit_oid, &commit, opts.abbrev_commit, &decoration)?;
                writeln!(self.writer())?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        abbrev_commit: bool,
        decoration: &str,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{}",
            format!("commit {}", Self::abbrev_commit_id(commit_oid, abbrev_commit)).yellow(),
            decoration
        )?;
        if let Some(parent) = commit.parent() {
            writeln!(
                self.writer(),
                "Parent: {}",
                Self::abbrev_commit_id(parent, abbrev_commit)
            )?;
        }
        writeln!(self.writer(), "Date:   {}", commit.readable_timestamp())?;

        let mut paths = commit.file_paths();
        if let Some(first) = paths.next() {
            writeln!(self.writer(), "Files:  {}", first.display())?;
        }
        for path in paths {
            writeln!(self.writer(), "        {}", path.display())?;
        }

        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        abbrev_commit: bool,
        decoration: &str,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{} {}",
            Self::abbrev_commit_id(commit_oid, abbrev_commit).yellow(),
            decoration,
            commit.short_message()
        )?;

        Ok(())
    }

    /// ` (HEAD -> main, feature)` for a commit some branches point at
    fn commit_decoration(
        &self,
        commit_oid: &ObjectId,
        reverse_refs: &HashMap<ObjectId, Vec<BranchName>>,
    ) -> String {
        let Some(branch_names) = reverse_refs.get(commit_oid) else {
            return String::new();
        };

        let current_branch = self.current_branch();
        let mut names = branch_names
            .iter()
            .filter(|name| *name != &*current_branch)
            .map(|name| name.as_ref().green().to_string())
            .collect::<Vec<_>>();

        if branch_names.contains(&current_branch) {
            names.insert(
                0,
                format!(
                    "{} -> {}",
                    "HEAD".cyan(),
                    current_branch.as_ref().green()
                ),
            );
        }

        format!(" ({})", names.join(", "))
    }

    fn abbrev_commit_id(oid: &ObjectId, abbrev_commit: bool) -> String {
        if abbrev_commit {
            oid.to_short_oid()
        } else {
            oid.as_ref().to_string()
        }
    }
}
