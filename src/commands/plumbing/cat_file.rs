use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::errors::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Print the object's content
    Pretty,
    /// Print the object's type
    Type,
}

impl Repository {
    pub fn cat_file(&mut self, object: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = Revision::try_parse(object)?
            .resolve_object(self)?
            .ok_or_else(|| RepositoryError::NoCommits(object.to_string()))?;
        let object = self.database().parse_object(&object_id)?;

        match mode {
            CatFileMode::Type => writeln!(self.writer(), "{}", object.object_type())?,
            CatFileMode::Pretty => match object {
                ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
                ObjectBox::Commit(commit) => writeln!(self.writer(), "{}", commit.display())?,
            },
        }

        Ok(())
    }
}
