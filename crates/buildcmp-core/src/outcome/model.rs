//! Outcome types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! `OutcomeKind` ordering defines the section order of a report.

use serde::{Deserialize, Serialize};

/// Discriminator for the kind of a build outcome.
///
/// The declaration order is the report order: archives first, then unknown outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// A generated archive (zip, jar, war, ...)
    Archive,
    /// An outcome whose kind could not be determined or cannot be compared
    Unknown,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Archive => "archive",
            OutcomeKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association key of an outcome: kind, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutcomeKey {
    pub kind: OutcomeKind,
    pub name: String,
}

impl std::fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Reference to a file materialized into the outcome file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Path relative to the file store root (e.g. `source/ab/ab12...ef.zip`)
    pub relative_path: String,
    /// SHA256 of the file content (lowercase hex)
    pub digest: String,
    /// Size in bytes
    pub size: u64,
}

/// One entry of an archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Path of the entry inside the archive
    pub path: String,
    /// True for directory entries
    #[serde(default)]
    pub directory: bool,
    /// Uncompressed size in bytes
    pub size: u64,
    /// SHA256 of the uncompressed content (lowercase hex)
    pub content_digest: String,
}

impl ArchiveEntry {
    pub fn file(path: impl Into<String>, size: u64, content_digest: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            directory: false,
            size,
            content_digest: content_digest.into(),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            directory: true,
            size: 0,
            content_digest: String::new(),
        }
    }

    /// Same type, size and content
    pub fn same_content(&self, other: &ArchiveEntry) -> bool {
        self.directory == other.directory
            && self.size == other.size
            && self.content_digest == other.content_digest
    }
}

/// An archive generated by the build.
///
/// An archive that the build declared but did not produce has neither a
/// stored file nor an entry listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveOutcome {
    pub name: String,
    /// Path of the task that produced the archive (e.g. `:app:jar`)
    pub task_path: String,
    /// Free-form archive type (e.g. `zip`, `jar`)
    pub archive_kind: String,
    pub file: Option<StoredFile>,
    pub entries: Option<Vec<ArchiveEntry>>,
}

impl ArchiveOutcome {
    pub fn new(
        name: impl Into<String>,
        task_path: impl Into<String>,
        archive_kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            task_path: task_path.into(),
            archive_kind: archive_kind.into(),
            file: None,
            entries: None,
        }
    }

    pub fn with_file(mut self, file: StoredFile) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_entries(mut self, entries: Vec<ArchiveEntry>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// True if the build actually produced this archive
    pub fn is_produced(&self) -> bool {
        self.file.is_some() || self.entries.is_some()
    }
}

/// An outcome whose kind is not understood by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownOutcome {
    pub name: String,
    pub task_path: String,
    /// Why the outcome could not be classified
    pub description: String,
}

impl UnknownOutcome {
    pub fn new(
        name: impl Into<String>,
        task_path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            task_path: task_path.into(),
            description: description.into(),
        }
    }
}

/// One observable result of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Archive(ArchiveOutcome),
    Unknown(UnknownOutcome),
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Archive(_) => OutcomeKind::Archive,
            Outcome::Unknown(_) => OutcomeKind::Unknown,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Outcome::Archive(a) => &a.name,
            Outcome::Unknown(u) => &u.name,
        }
    }

    pub fn task_path(&self) -> &str {
        match self {
            Outcome::Archive(a) => &a.task_path,
            Outcome::Unknown(u) => &u.task_path,
        }
    }

    pub fn key(&self) -> OutcomeKey {
        OutcomeKey {
            kind: self.kind(),
            name: self.name().to_string(),
        }
    }
}

impl From<ArchiveOutcome> for Outcome {
    fn from(archive: ArchiveOutcome) -> Self {
        Outcome::Archive(archive)
    }
}

impl From<UnknownOutcome> for Outcome {
    fn from(unknown: UnknownOutcome) -> Self {
        Outcome::Unknown(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_orders_archive_before_unknown() {
        assert!(OutcomeKind::Archive < OutcomeKind::Unknown);
    }

    #[test]
    fn test_key_orders_by_kind_then_name() {
        let a = OutcomeKey {
            kind: OutcomeKind::Unknown,
            name: "a".to_string(),
        };
        let z = OutcomeKey {
            kind: OutcomeKind::Archive,
            name: "z".to_string(),
        };
        assert!(z < a);
    }

    #[test]
    fn test_declared_but_missing_archive_is_not_produced() {
        let archive = ArchiveOutcome::new("build/libs/app.zip", ":zip", "zip");
        assert!(!archive.is_produced());
        assert!(archive.with_entries(Vec::new()).is_produced());
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let outcome: Outcome = UnknownOutcome::new("x", ":x", "reason A").into();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "unknown");
        assert_eq!(json["name"], "x");
    }

    #[test]
    fn test_entry_same_content() {
        let a = ArchiveEntry::file("a.txt", 3, "aa");
        assert!(a.same_content(&ArchiveEntry::file("other.txt", 3, "aa")));
        assert!(!a.same_content(&ArchiveEntry::file("a.txt", 4, "aa")));
        assert!(!a.same_content(&ArchiveEntry::directory("a.txt")));
    }
}
