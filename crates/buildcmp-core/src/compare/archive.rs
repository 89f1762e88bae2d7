//! Archive comparator.
//!
//! Diffs the entry listings of two archives by path. Entries present on both
//! sides are compared by type, size and content digest. When either listing
//! is unavailable the whole-archive digests are compared instead.
//!
//! A produced archive without a listing has its entries read from the stored
//! file when the comparator carries an [`ArchiveContentReader`].

use crate::compare::model::{
    ArchiveAvailability, ArchiveComparison, Classification, ComparisonBasis, EntryChange,
    EntryComparison, OutcomeComparison,
};
use crate::compare::registry::OutcomeComparator;
use crate::errors::{BuildCompareError, Result};
use crate::outcome::{ArchiveEntry, ArchiveOutcome, Outcome, OutcomeKind, StoredFile};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Reads the entry listing of a stored archive.
pub trait ArchiveContentReader: Send + Sync {
    /// List every entry of `file`, the stored bytes of `archive`.
    ///
    /// # Errors
    ///
    /// `ComparisonFailed` if the stored file cannot be read or is not a
    /// readable archive.
    fn read_entries(
        &self,
        archive: &ArchiveOutcome,
        file: &StoredFile,
    ) -> Result<Vec<ArchiveEntry>>;
}

/// Compares [`ArchiveOutcome`]s.
#[derive(Default)]
pub struct ArchiveComparator {
    content: Option<Box<dyn ArchiveContentReader>>,
}

impl ArchiveComparator {
    /// Comparator that only uses listings already present on the outcomes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_reader(reader: impl ArchiveContentReader + 'static) -> Self {
        Self {
            content: Some(Box::new(reader)),
        }
    }

    fn with_listing<'a>(&self, archive: &'a ArchiveOutcome) -> Result<Cow<'a, ArchiveOutcome>> {
        match (&self.content, &archive.entries, &archive.file) {
            (Some(reader), None, Some(file)) => {
                let entries = reader.read_entries(archive, file)?;
                Ok(Cow::Owned(archive.clone().with_entries(entries)))
            }
            _ => Ok(Cow::Borrowed(archive)),
        }
    }
}

impl OutcomeComparator for ArchiveComparator {
    fn kind(&self) -> OutcomeKind {
        OutcomeKind::Archive
    }

    fn compare(&self, source: &Outcome, target: &Outcome) -> Result<OutcomeComparison> {
        let source = self.with_listing(as_archive(source)?)?;
        let target = self.with_listing(as_archive(target)?)?;
        Ok(OutcomeComparison::Archive(compare_archives(&source, &target)?))
    }
}

impl std::fmt::Debug for ArchiveComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveComparator")
            .field("reads_content", &self.content.is_some())
            .finish()
    }
}

fn as_archive(outcome: &Outcome) -> std::result::Result<&ArchiveOutcome, BuildCompareError> {
    match outcome {
        Outcome::Archive(archive) => Ok(archive),
        other => Err(BuildCompareError::KindMismatch {
            expected: OutcomeKind::Archive.to_string(),
            actual: other.kind().to_string(),
            name: other.name().to_string(),
        }),
    }
}

/// Index a listing by path, rejecting listings that name an entry twice.
fn index_entries<'a>(
    archive: &ArchiveOutcome,
    entries: &'a [ArchiveEntry],
) -> std::result::Result<BTreeMap<&'a str, &'a ArchiveEntry>, BuildCompareError> {
    let mut index = BTreeMap::new();
    for entry in entries {
        if index.insert(entry.path.as_str(), entry).is_some() {
            return Err(BuildCompareError::DuplicateArchiveEntry {
                name: archive.name.clone(),
                path: entry.path.clone(),
            });
        }
    }
    Ok(index)
}

/// Diff two listings. Returns the differing entries sorted by path and the
/// count of unchanged entries.
fn diff_entries(
    source: &BTreeMap<&str, &ArchiveEntry>,
    target: &BTreeMap<&str, &ArchiveEntry>,
) -> (Vec<EntryComparison>, usize) {
    let mut differing = Vec::new();
    let mut unchanged = 0;

    for (path, source_entry) in source {
        match target.get(path) {
            Some(target_entry) if source_entry.same_content(target_entry) => unchanged += 1,
            Some(target_entry) => differing.push(EntryComparison {
                path: (*path).to_string(),
                change: EntryChange::Changed,
                source: Some((*source_entry).clone()),
                target: Some((*target_entry).clone()),
            }),
            None => differing.push(EntryComparison {
                path: (*path).to_string(),
                change: EntryChange::Removed,
                source: Some((*source_entry).clone()),
                target: None,
            }),
        }
    }

    for (path, target_entry) in target {
        if !source.contains_key(path) {
            differing.push(EntryComparison {
                path: (*path).to_string(),
                change: EntryChange::Added,
                source: None,
                target: Some((*target_entry).clone()),
            });
        }
    }

    differing.sort_by(|a, b| a.path.cmp(&b.path));
    (differing, unchanged)
}

/// Compare two archive outcomes.
///
/// # Errors
///
/// `ComparisonFailed` (via `DuplicateArchiveEntry`) when a listing names the
/// same path twice, which means the archive could not be read reliably.
pub fn compare_archives(
    source: &ArchiveOutcome,
    target: &ArchiveOutcome,
) -> std::result::Result<ArchiveComparison, BuildCompareError> {
    let availability = match (source.is_produced(), target.is_produced()) {
        (true, true) => ArchiveAvailability::BothProduced,
        (false, false) => ArchiveAvailability::NeitherProduced,
        (true, false) => ArchiveAvailability::OnlySourceProduced,
        (false, true) => ArchiveAvailability::OnlyTargetProduced,
    };

    let mut comparison = ArchiveComparison {
        source: source.clone(),
        target: target.clone(),
        classification: Classification::Different,
        availability,
        basis: ComparisonBasis::Availability,
        entries: Vec::new(),
        unchanged_entries: 0,
    };

    match availability {
        ArchiveAvailability::NeitherProduced => {
            comparison.classification = Classification::Equal;
        }
        ArchiveAvailability::OnlySourceProduced | ArchiveAvailability::OnlyTargetProduced => {}
        ArchiveAvailability::BothProduced => match (&source.entries, &target.entries) {
            (Some(source_entries), Some(target_entries)) => {
                let source_index = index_entries(source, source_entries)?;
                let target_index = index_entries(target, target_entries)?;
                let (entries, unchanged) = diff_entries(&source_index, &target_index);

                comparison.basis = ComparisonBasis::Entries;
                comparison.classification = if entries.is_empty() {
                    Classification::Equal
                } else {
                    Classification::Different
                };
                comparison.entries = entries;
                comparison.unchanged_entries = unchanged;
            }
            _ => {
                comparison.basis = ComparisonBasis::ArchiveDigest;
                let same_bytes = matches!(
                    (&source.file, &target.file),
                    (Some(a), Some(b)) if a.digest == b.digest
                );
                if same_bytes {
                    comparison.classification = Classification::Equal;
                }
            }
        },
    }

    Ok(comparison)
}
