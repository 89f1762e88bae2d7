//! Comparison result types.
//!
//! Collections are sorted for deterministic serialization.

use crate::outcome::{
    ArchiveEntry, ArchiveOutcome, Outcome, OutcomeKey, OutcomeKind, UnknownOutcome,
};
use serde::Serialize;

/// Classification of an associated pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Equal,
    Different,
}

impl Classification {
    pub fn is_equal(&self) -> bool {
        matches!(self, Classification::Equal)
    }
}

/// Whether each side actually produced its archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveAvailability {
    BothProduced,
    NeitherProduced,
    OnlySourceProduced,
    OnlyTargetProduced,
}

/// What the archive classification was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonBasis {
    /// Entry listings of both archives were diffed
    Entries,
    /// At least one listing was unavailable; whole-archive digests were compared
    ArchiveDigest,
    /// At least one side did not produce the archive
    Availability,
}

/// How an archive entry differs between the two builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryChange {
    /// Present only in the target archive
    Added,
    /// Present only in the source archive
    Removed,
    /// Present in both with different type, size or content
    Changed,
}

/// One differing archive entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryComparison {
    pub path: String,
    pub change: EntryChange,
    pub source: Option<ArchiveEntry>,
    pub target: Option<ArchiveEntry>,
}

/// Comparison of two archive outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveComparison {
    pub source: ArchiveOutcome,
    pub target: ArchiveOutcome,
    pub classification: Classification,
    pub availability: ArchiveAvailability,
    pub basis: ComparisonBasis,
    /// Differing entries, sorted by path
    pub entries: Vec<EntryComparison>,
    /// Number of entries identical on both sides
    pub unchanged_entries: usize,
}

impl ArchiveComparison {
    pub fn with_change(&self, change: EntryChange) -> impl Iterator<Item = &EntryComparison> {
        self.entries.iter().filter(move |e| e.change == change)
    }

    pub fn added(&self) -> Vec<&str> {
        self.with_change(EntryChange::Added)
            .map(|e| e.path.as_str())
            .collect()
    }

    pub fn removed(&self) -> Vec<&str> {
        self.with_change(EntryChange::Removed)
            .map(|e| e.path.as_str())
            .collect()
    }

    pub fn changed(&self) -> Vec<&str> {
        self.with_change(EntryChange::Changed)
            .map(|e| e.path.as_str())
            .collect()
    }
}

/// Comparison of two unknown outcomes. Always `DIFFERENT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnknownComparison {
    pub source: UnknownOutcome,
    pub target: UnknownOutcome,
    /// Explanation shown in the report
    pub reason: String,
}

/// Classified result for one associated pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeComparison {
    Archive(ArchiveComparison),
    Unknown(UnknownComparison),
}

impl OutcomeComparison {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            OutcomeComparison::Archive(_) => OutcomeKind::Archive,
            OutcomeComparison::Unknown(_) => OutcomeKind::Unknown,
        }
    }

    /// Name of the source side of the pair
    pub fn name(&self) -> &str {
        match self {
            OutcomeComparison::Archive(c) => &c.source.name,
            OutcomeComparison::Unknown(c) => &c.source.name,
        }
    }

    pub fn classification(&self) -> Classification {
        match self {
            OutcomeComparison::Archive(c) => c.classification,
            OutcomeComparison::Unknown(_) => Classification::Different,
        }
    }
}

/// One line of the aggregate result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ComparisonEntry {
    /// An associated pair and its comparison
    Compared { comparison: OutcomeComparison },
    /// An outcome only the source build produced
    SourceOnly { outcome: Outcome },
    /// An outcome only the target build produced
    TargetOnly { outcome: Outcome },
}

impl ComparisonEntry {
    pub fn key(&self) -> OutcomeKey {
        match self {
            ComparisonEntry::Compared { comparison } => OutcomeKey {
                kind: comparison.kind(),
                name: comparison.name().to_string(),
            },
            ComparisonEntry::SourceOnly { outcome } | ComparisonEntry::TargetOnly { outcome } => {
                outcome.key()
            }
        }
    }

    /// True only for an associated pair classified `EQUAL`
    pub fn is_identical(&self) -> bool {
        match self {
            ComparisonEntry::Compared { comparison } => comparison.classification().is_equal(),
            ComparisonEntry::SourceOnly { .. } | ComparisonEntry::TargetOnly { .. } => false,
        }
    }
}

/// Aggregate result of comparing two builds.
///
/// `builds_are_identical` is derived at construction and serialized with the
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildComparisonResult {
    builds_are_identical: bool,
    entries: Vec<ComparisonEntry>,
}

impl BuildComparisonResult {
    pub fn new(entries: Vec<ComparisonEntry>) -> Self {
        let builds_are_identical = entries.iter().all(ComparisonEntry::is_identical);
        Self {
            builds_are_identical,
            entries,
        }
    }

    pub fn builds_are_identical(&self) -> bool {
        self.builds_are_identical
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that are not identical
    pub fn difference_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_identical()).count()
    }

    pub fn source_only_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ComparisonEntry::SourceOnly { .. }))
            .count()
    }

    pub fn target_only_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ComparisonEntry::TargetOnly { .. }))
            .count()
    }
}
