//! Index (staging area)
//!
//! The index holds the `(path, digest)` pairs the next commit will snapshot, in
//! the order they were staged. Re-staging a path drops its old entry and appends
//! the new one at the end.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: Staged paths with their blob digests
//! - Checksum: SHA-256 of the entire index for integrity verification
//!
//! A missing or zero-length file is an empty index. Anything else that fails to
//! parse is `CorruptIndex`; it is never silently treated as empty.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_PREFIX_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::anyhow;
use byteorder::ByteOrder;
use bytes::Bytes;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Staging area persisted at `.trove/index`
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file
    path: Box<Path>,
    /// Staged entries in staging order, paths unique
    entries: Vec<IndexEntry>,
    /// Index file header metadata
    header: IndexHeader,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.has_path(path))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Drop every staged entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.header = IndexHeader::empty();
        self.changed = true;
    }

    /// Load the index from disk
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.header = IndexHeader::empty();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        // if the index file is empty, return early
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        self.parse(&mut reader).map_err(|err| {
            self.entries.clear();
            RepositoryError::CorruptIndex(err.to_string()).into()
        })
    }

    fn parse(&mut self, reader: &mut Checksum) -> anyhow::Result<()> {
        let entries_count = self.parse_header(reader)?;
        self.parse_entries(entries_count, reader)?;

        reader.verify()
    }

    fn parse_header(&self, reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    /// Parse all entries from the index file
    ///
    /// The path length in each entry's fixed prefix tells how many more bytes
    /// (path plus padding) belong to it.
    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let prefix = reader.read(ENTRY_PREFIX_SIZE)?;
            let path_len = byteorder::NetworkEndian::read_u16(&prefix[ENTRY_PREFIX_SIZE - 2..]);
            let rest = reader.read(IndexEntry::padded_size(path_len as usize) - ENTRY_PREFIX_SIZE)?;

            let entry_bytes = Bytes::from([prefix, rest].concat());
            let entry = IndexEntry::deserialize(std::io::Cursor::new(entry_bytes))?;

            if self.entry_by_path(&entry.path).is_some() {
                return Err(anyhow!("Duplicate index entry for {}", entry.path.display()));
            }
            self.entries.push(entry);
        }

        self.header.entries_count = entries_count;

        Ok(())
    }

    /// Stage `oid` for `path`
    ///
    /// Any previous entry for the path is removed and the new one appended, so
    /// the index never holds two entries for one path.
    pub fn upsert(&mut self, path: PathBuf, oid: ObjectId) {
        self.entries.retain(|entry| !entry.has_path(&path));
        self.entries.push(IndexEntry::new(path, oid));

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    /// Persist the staged entries
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file while writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        self.header = IndexHeader {
            entries_count: self.entries.len() as u32,
            ..self.header.clone()
        };
        let header_bytes = self.header.serialize()?;
        writer.write(&header_bytes)?;

        for entry in self.entries() {
            let entry_bytes = entry.serialize()?;
            writer.write(&entry_bytes)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        tracing::debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }
}
