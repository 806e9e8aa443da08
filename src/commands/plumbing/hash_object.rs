use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

impl Repository {
    /// Print the digest a file would be stored under, storing it when `write` is set
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<ObjectId> {
        let object_path = self.workspace().relative_path(Path::new(object_path))?;
        let object = Blob::new(self.workspace().read_file(&object_path)?);

        let object_id = if write {
            self.database().store(&object)?
        } else {
            object.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
