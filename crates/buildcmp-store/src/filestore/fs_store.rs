//! Filesystem-backed outcome file store

use crate::errors::{io_error, store_collision, store_missing, store_vanished, Result};
use crate::filestore::atomic::atomic_write;
use crate::filestore::sharding::shard_relative_path;
use buildcmp_core::outcome::StoredFile;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Content-addressed store for files materialized from build outcomes.
///
/// Clones share the same root and the same record of whether anything was
/// stored.
#[derive(Debug, Clone)]
pub struct OutcomeFileStore {
    root: PathBuf,
    written: Arc<AtomicBool>,
}

impl OutcomeFileStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True once any file has been stored
    pub fn is_written(&self) -> bool {
        self.written.load(Ordering::SeqCst)
    }

    /// Store `content` under `namespace`.
    ///
    /// - Idempotent: storing the same content twice returns the same file
    /// - Fails with `FileStoreCollision` if the target exists with different content
    ///
    /// # Errors
    ///
    /// `FileStoreCollision` on differing existing content, `Io` on write failure.
    pub fn store_bytes(
        &self,
        namespace: &str,
        content: &[u8],
        extension: &str,
    ) -> Result<StoredFile> {
        let digest = compute_digest(content);
        let relative_path = shard_relative_path(namespace, &digest, extension);
        let target_path = self.root.join(&relative_path);

        if target_path.exists() {
            let existing = fs::read(&target_path).map_err(|e| io_error("file_store_read", e))?;
            if existing != content {
                return Err(store_collision(&relative_path));
            }
        } else {
            atomic_write(&target_path, content)?;
        }
        self.written.store(true, Ordering::SeqCst);

        Ok(StoredFile {
            relative_path,
            digest,
            size: content.len() as u64,
        })
    }

    /// Copy the file at `path` into the store under `namespace`, keeping its
    /// extension.
    ///
    /// # Errors
    ///
    /// `Io` if `path` cannot be read, otherwise as [`store_bytes`](Self::store_bytes).
    pub fn store_file(&self, namespace: &str, path: &Path) -> Result<StoredFile> {
        let content = fs::read(path).map_err(|e| {
            io_error(&format!("file_store_copy {}", path.display()), e)
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        self.store_bytes(namespace, &content, extension)
    }

    /// Read a stored file by its store-relative path
    ///
    /// # Errors
    ///
    /// `FileStoreMissing` if nothing is stored at `relative_path`.
    pub fn read(&self, relative_path: &str) -> Result<Vec<u8>> {
        let path = self.root.join(relative_path);
        if !path.is_file() {
            return Err(store_missing(relative_path));
        }
        fs::read(&path).map_err(|e| io_error("file_store_read", e))
    }

    /// Move the whole store to `destination`, returning the relocated store.
    ///
    /// A store that was never written to yields an empty directory at the
    /// destination. Falls back to copy-then-delete when a rename is not
    /// possible (e.g. across filesystems).
    ///
    /// # Errors
    ///
    /// - `FileStoreMissing` if files were stored but the root has since
    ///   disappeared
    /// - `Io` if the store cannot be moved or copied
    pub fn move_to(self, destination: impl Into<PathBuf>) -> Result<OutcomeFileStore> {
        let destination = destination.into();
        if !self.root.exists() && self.is_written() {
            return Err(store_vanished(&self.root));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("file_store_move", e))?;
        }
        if destination.exists() {
            fs::remove_dir_all(&destination).map_err(|e| io_error("file_store_move", e))?;
        }

        let moved = OutcomeFileStore {
            root: destination,
            written: self.written,
        };
        if !self.root.exists() {
            fs::create_dir_all(&moved.root).map_err(|e| io_error("file_store_move", e))?;
            return Ok(moved);
        }

        if fs::rename(&self.root, &moved.root).is_err() {
            copy_dir(&self.root, &moved.root)?;
            fs::remove_dir_all(&self.root).map_err(|e| io_error("file_store_move", e))?;
        }
        Ok(moved)
    }

    /// Delete the store directory if it exists
    ///
    /// # Errors
    ///
    /// `Io` if the directory cannot be removed.
    pub fn discard(self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(|e| io_error("file_store_discard", e))?;
        }
        Ok(())
    }
}

/// SHA256 of `content`, lowercase hex
pub fn compute_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).map_err(|e| io_error("file_store_copy_dir", e))?;
    for entry in fs::read_dir(from).map_err(|e| io_error("file_store_copy_dir", e))? {
        let entry = entry.map_err(|e| io_error("file_store_copy_dir", e))?;
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| io_error("file_store_copy_dir", e))?;
        }
    }
    Ok(())
}
