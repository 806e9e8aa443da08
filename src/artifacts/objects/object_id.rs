//! Object identifier (SHA-256 digest)
//!
//! Object IDs are 64-character lowercase hexadecimal strings representing SHA-256
//! digests. They identify every object in the store (blobs and commits).
//!
//! ## Format
//!
//! - Full: 64 hex characters
//! - Short: First 7 characters
//!
//! ## Storage
//!
//! Objects are stored flat under `.trove/objects/<digest>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use sha2::{Digest, Sha256};
use std::io;
use std::path::PathBuf;

/// SHA-256 object identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase digits are normalized to lowercase so that the same digest is
    /// always filed under the same name.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Digest of the exact byte sequence
    pub fn hash(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Write the object ID in binary format (32 bytes)
    ///
    /// Used by the index file, which stores digests raw.
    pub fn write_h64_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex64 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex64[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from binary format (32 bytes)
    pub fn read_h64_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut buffer = [0; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut buffer)?;

        let hex64 = buffer
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();

        Self::try_parse(hex64)
    }

    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
