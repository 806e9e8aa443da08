//! Content-addressable object store
//!
//! Every object lives in `.trove/objects/<digest>`, where the digest is the
//! SHA-256 of the exact bytes in the file. Objects are immutable and never
//! removed. Writing the same content twice is a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const TEMP_OBJECT_PREFIX: &str = "tmp-obj-";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store raw bytes under their digest
    ///
    /// Identical content is written once; later calls return the same digest
    /// without touching the file.
    pub fn put(&self, content: &[u8]) -> anyhow::Result<ObjectId> {
        let object_id = ObjectId::hash(content);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
        } else {
            std::fs::create_dir_all(&self.path).context(format!(
                "Unable to create object directory {}",
                self.path.display()
            ))?;

            self.write_object(object_path, content)?;
            tracing::debug!(oid = %object_id, size = content.len(), "stored object");
        }

        Ok(object_id)
    }

    /// Load the bytes stored under `object_id`
    ///
    /// The content is rehashed on the way out, so a tampered or half-copied
    /// file surfaces as `CorruptObject` instead of wrong data.
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Err(RepositoryError::NotFound(object_id.to_string()).into());
        }

        let content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        if ObjectId::hash(&content) != *object_id {
            return Err(RepositoryError::CorruptObject(object_id.clone()).into());
        }

        Ok(content.into())
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let content = object.serialize()?;
        self.put(&content)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let content = self.get(object_id)?;

        match ObjectType::detect(&content) {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::new(content)))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                Cursor::new(content),
            )?))),
        }
    }

    /// Load a commit record
    ///
    /// A missing object or one that does not parse as a commit means some ref or
    /// parent link points at garbage, which is reported as `BrokenHistory`.
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.get(object_id).map_err(|err| match RepositoryError::find(&err) {
            Some(RepositoryError::NotFound(_)) => {
                RepositoryError::BrokenHistory(format!("commit {object_id} is missing")).into()
            }
            _ => err,
        })?;

        if ObjectType::detect(&content) != ObjectType::Commit {
            return Err(
                RepositoryError::BrokenHistory(format!("object {object_id} is not a commit"))
                    .into(),
            );
        }

        Commit::deserialize(Cursor::new(content)).map_err(|err| {
            RepositoryError::BrokenHistory(format!("commit {object_id} is malformed: {err}"))
                .into()
        })
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        Ok(ObjectType::detect(&self.get(object_id)?))
    }

    fn write_object(&self, object_path: PathBuf, object_content: &[u8]) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all().context(format!(
            "Unable to flush object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("{TEMP_OBJECT_PREFIX}{}", rand::random::<u32>())
    }

    /// Find all objects whose digest starts with the given prefix
    ///
    /// Used to resolve abbreviated digests. More than one match means the prefix
    /// is ambiguous; the caller decides what to do about it.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();

        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = std::fs::read_dir(&self.path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with(&prefix) && !name.starts_with(TEMP_OBJECT_PREFIX))
            .filter_map(|name| ObjectId::try_parse(name).ok())
            .collect::<Vec<_>>();
        matches.sort();

        Ok(matches)
    }
}
