//! Archive listings from stored files
//!
//! Reads the entries of an archive copied into the outcome file store, so
//! two rebuilt archives are compared by what they contain rather than by
//! their bytes. Entry sizes and digests are computed from the uncompressed
//! entry content; timestamps and compression settings are ignored.

use crate::errors::Result;
use crate::filestore::{compute_digest, OutcomeFileStore};
use buildcmp_core::compare::{
    ArchiveComparator, ArchiveContentReader, ComparatorRegistry, UnknownComparator,
};
use buildcmp_core::errors::{BuildCompareError, ExError};
use buildcmp_core::outcome::{ArchiveEntry, ArchiveOutcome, StoredFile};
use buildcmp_core::standard::standard_associator;
use buildcmp_core::BuildComparator;
use std::io::{Cursor, Read};

/// Reads archive listings from an [`OutcomeFileStore`].
#[derive(Debug, Clone)]
pub struct StoredArchiveReader {
    store: OutcomeFileStore,
}

impl StoredArchiveReader {
    pub fn new(store: OutcomeFileStore) -> Self {
        Self { store }
    }
}

impl ArchiveContentReader for StoredArchiveReader {
    fn read_entries(
        &self,
        archive: &ArchiveOutcome,
        file: &StoredFile,
    ) -> Result<Vec<ArchiveEntry>> {
        let bytes = self
            .store
            .read(&file.relative_path)
            .map_err(|e| unreadable(archive, e.message()).with_source(e))?;

        let listing = if archive.archive_kind == "tar" {
            tar_entries(&bytes)
        } else {
            zip_entries(&bytes)
        };
        let entries = listing.map_err(|reason| unreadable(archive, &reason))?;

        tracing::debug!(
            archive = archive.name.as_str(),
            entries = entries.len(),
            "read archive listing"
        );
        Ok(entries)
    }
}

fn unreadable(archive: &ArchiveOutcome, reason: &str) -> ExError {
    ExError::from(BuildCompareError::UnreadableArchive {
        name: archive.name.clone(),
        reason: reason.to_string(),
    })
    .with_op("read_archive_entries")
}

fn zip_entries(bytes: &[u8]) -> std::result::Result<Vec<ArchiveEntry>, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|e| e.to_string())?;
        let path = file.name().to_string();
        if file.is_dir() {
            entries.push(ArchiveEntry::directory(path));
            continue;
        }
        let mut content = Vec::new();
        file.read_to_end(&mut content).map_err(|e| e.to_string())?;
        entries.push(ArchiveEntry::file(
            path,
            content.len() as u64,
            compute_digest(&content),
        ));
    }
    Ok(entries)
}

fn tar_entries(bytes: &[u8]) -> std::result::Result<Vec<ArchiveEntry>, String> {
    let mut archive = tar::Archive::new(Cursor::new(bytes));
    let mut entries = Vec::new();
    for entry in archive.entries().map_err(|e| e.to_string())? {
        let mut entry = entry.map_err(|e| e.to_string())?;
        let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        if entry.header().entry_type().is_dir() {
            entries.push(ArchiveEntry::directory(path));
            continue;
        }
        let mut content = Vec::new();
        entry.read_to_end(&mut content).map_err(|e| e.to_string())?;
        entries.push(ArchiveEntry::file(
            path,
            content.len() as u64,
            compute_digest(&content),
        ));
    }
    Ok(entries)
}

/// Standard comparator whose archive comparisons read listings from `store`
///
/// # Errors
///
/// `DuplicateRegistration` if two handlers claim the same kind.
pub fn stored_build_comparator(store: &OutcomeFileStore) -> Result<BuildComparator> {
    let comparators = ComparatorRegistry::new()
        .with(ArchiveComparator::with_content_reader(
            StoredArchiveReader::new(store.clone()),
        ))?
        .with(UnknownComparator)?;
    Ok(BuildComparator::new(standard_associator()?, comparators))
}
