use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeType {
    Added(ObjectId),
    Removed(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl ChangeType {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(ChangeType::Added(new.clone())),
            (Some(old), None) => Some(ChangeType::Removed(old.clone())),
            (Some(old), Some(new)) if old != new => Some(ChangeType::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None, // unchanged, or absent on both sides
        }
    }

    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            ChangeType::Added(_) => filter.contains(DiffFilter::ADDED),
            ChangeType::Removed(_) => filter.contains(DiffFilter::DELETED),
            ChangeType::Modified { .. } => filter.contains(DiffFilter::MODIFIED),
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            ChangeType::Added(_) => 'A',
            ChangeType::Removed(_) => 'D',
            ChangeType::Modified { .. } => 'M',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Added(_) => "Added",
            ChangeType::Removed(_) => "Removed",
            ChangeType::Modified { .. } => "Modified",
        }
    }

    /// The same change seen from the other side
    pub fn reversed(&self) -> Self {
        match self {
            ChangeType::Added(oid) => ChangeType::Removed(oid.clone()),
            ChangeType::Removed(oid) => ChangeType::Added(oid.clone()),
            ChangeType::Modified { old, new } => ChangeType::Modified {
                old: new.clone(),
                new: old.clone(),
            },
        }
    }
}

pub type ChangeSet = BTreeMap<PathBuf, ChangeType>;
type SnapshotMap<'c> = BTreeMap<&'c Path, &'c ObjectId>;

/// File-level comparison of two commit snapshots
#[derive(Debug, Default)]
pub struct SnapshotDiff {
    change_set: ChangeSet,
}

impl SnapshotDiff {
    /// Classify every path of `old` and `new`
    ///
    /// Paths only in `new` are added, paths only in `old` are removed, paths in
    /// both with different digests are modified. Unchanged paths are left out.
    pub fn compare(old: &Commit, new: &Commit) -> Self {
        let old_files = Self::snapshot(old);
        let new_files = Self::snapshot(new);

        let change_set = old_files
            .keys()
            .chain(new_files.keys())
            .filter_map(|path| {
                ChangeType::from_entries(
                    old_files.get(path).copied(),
                    new_files.get(path).copied(),
                )
                .map(|change| (path.to_path_buf(), change))
            })
            .collect::<ChangeSet>();

        SnapshotDiff { change_set }
    }

    fn snapshot(commit: &Commit) -> SnapshotMap<'_> {
        commit
            .files()
            .iter()
            .map(|entry| (entry.path.as_path(), &entry.oid))
            .collect()
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.change_set
    }

    pub fn filtered(&self, filter: DiffFilter) -> impl Iterator<Item = (&PathBuf, &ChangeType)> {
        self.change_set
            .iter()
            .filter(move |(_, change)| change.matches_filter(filter))
    }

    pub fn is_empty(&self) -> bool {
        self.change_set.is_empty()
    }

    pub fn into_changes(self) -> ChangeSet {
        self.change_set
    }
}
