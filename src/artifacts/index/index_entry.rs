//! Index entry representation
//!
//! Each entry in the index pairs a working-tree path with the digest of the
//! blob last staged for it. The same pair is what a commit records per file.
//!
//! ## Entry Format
//!
//! ```text
//! digest      32 bytes (raw SHA-256)
//! path length  2 bytes (big-endian)
//! path         UTF-8, NUL padded to the next 8-byte boundary (at least one NUL)
//! ```

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Maximum path length supported in index entries
const MAX_PATH_SIZE: usize = u16::MAX as usize;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Fixed-size prefix of an entry: raw digest plus path length
pub const ENTRY_PREFIX_SIZE: usize = OBJECT_ID_LENGTH / 2 + 2;

/// Staged file: path relative to the repository root and its blob digest
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct IndexEntry {
    pub path: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Path as stored on disk and in commit records
    pub fn path_str(&self) -> anyhow::Result<&str> {
        self.path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid entry path {}", self.path.display()))
    }

    pub fn has_path(&self, path: &Path) -> bool {
        self.path == path
    }

    /// Total on-disk size of an entry whose path is `path_len` bytes long
    pub fn padded_size(path_len: usize) -> usize {
        (ENTRY_PREFIX_SIZE + path_len) / ENTRY_BLOCK * ENTRY_BLOCK + ENTRY_BLOCK
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let path = self.path_str()?;
        if path.is_empty() || path.len() > MAX_PATH_SIZE {
            anyhow::bail!("Invalid entry path length: {}", path.len());
        }

        let mut entry_bytes = Vec::with_capacity(Self::padded_size(path.len()));
        self.oid.write_h64_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(path.len() as u16)?;
        entry_bytes.write_all(path.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_PREFIX_SIZE {
            anyhow::bail!("Invalid index entry size");
        }

        let oid = ObjectId::read_h64_from(&mut &bytes[..OBJECT_ID_LENGTH / 2])?;
        let path_len =
            byteorder::NetworkEndian::read_u16(&bytes[OBJECT_ID_LENGTH / 2..ENTRY_PREFIX_SIZE])
                as usize;

        if path_len == 0 || bytes.len() != Self::padded_size(path_len) {
            anyhow::bail!("Index entry length does not match its path length");
        }

        let path_end = ENTRY_PREFIX_SIZE + path_len;
        if bytes[path_end..].iter().any(|&b| b != 0) {
            anyhow::bail!("Index entry padding is not zeroed");
        }

        let path = std::str::from_utf8(&bytes[ENTRY_PREFIX_SIZE..path_end])
            .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in entry path"))?;

        Ok(IndexEntry::new(PathBuf::from(path), oid))
    }
}
