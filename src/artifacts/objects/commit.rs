//! Commit object
//!
//! Commits are immutable snapshots of the staging area. They contain:
//! - The parent commit ID (absent for a root commit)
//! - The time the commit was built
//! - Every staged `(digest, path)` pair, in staging order
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-digest>
//! timestamp <unix-seconds> <timezone>
//! file <blob-digest> <path>
//!
//! <commit message>
//! ```
//!
//! The digest covers all of it, so two commits differing in any field never
//! share an identity.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SubsecRound};
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Snapshot record linked to at most one parent
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    files: Vec<IndexEntry>,
    message: String,
}

impl Commit {
    /// Build a commit over the staged entries
    ///
    /// Fails with `EmptyCommit` when nothing is staged. The timestamp is kept to
    /// whole seconds, which is the resolution the record is stored with.
    pub fn try_build(
        message: String,
        files: Vec<IndexEntry>,
        parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<Self> {
        if files.is_empty() {
            return Err(RepositoryError::EmptyCommit.into());
        }

        Ok(Commit {
            parent,
            timestamp: timestamp.trunc_subsecs(0),
            files,
            message,
        })
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn files(&self) -> &[IndexEntry] {
        &self.files
    }

    pub fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|entry| entry.path.as_path())
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn body(&self) -> anyhow::Result<String> {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for entry in &self.files {
            let path = entry.path_str()?;
            if path.contains('\n') {
                anyhow::bail!("Path {:?} cannot be recorded in a commit", path);
            }
            lines.push(format!("file {} {}", entry.oid.as_ref(), path));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(lines.join("\n"))
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: timestamp is not a number")?;

        let offset = Self::parse_offset(timezone)
            .with_context(|| format!("Invalid commit object: bad timezone {timezone}"))?;
        let utc = DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?;

        Ok(utc.with_timezone(&offset))
    }

    fn parse_offset(timezone: &str) -> Option<FixedOffset> {
        if timezone.len() != 5 {
            return None;
        }

        let sign = match &timezone[..1] {
            "+" => 1,
            "-" => -1,
            _ => return None,
        };
        let hours = timezone[1..3].parse::<i32>().ok()?;
        let minutes = timezone[3..5].parse::<i32>().ok()?;

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = self.body()?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), body.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(body.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let size = ObjectType::parse_commit_header(&mut reader)?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        if content.len() != size {
            anyhow::bail!(
                "Invalid commit object: header declares {} bytes, found {}",
                size,
                content.len()
            );
        }

        let content = String::from_utf8(content)?;
        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parent = None;
        let mut timestamp = None;
        let mut files = Vec::new();

        for line in header.split('\n') {
            if let Some(oid) = line.strip_prefix("parent ") {
                if parent.is_some() || timestamp.is_some() {
                    anyhow::bail!("Invalid commit object: misplaced parent line");
                }
                parent = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(value) = line.strip_prefix("timestamp ") {
                if timestamp.is_some() {
                    anyhow::bail!("Invalid commit object: duplicate timestamp line");
                }
                timestamp = Some(Self::parse_timestamp(value)?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: malformed file line")?;
                files.push(IndexEntry::new(
                    PathBuf::from(path),
                    ObjectId::try_parse(oid.to_string())?,
                ));
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;

        Ok(Commit {
            parent,
            timestamp,
            files,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body().unwrap_or_else(|err| format!("<unprintable commit: {err}>"))
    }
}
