use crate::error::{PlannerError, Result};
use crate::paths;
use crate::types::Database;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The single planning document on disk, read and written as a whole.
///
/// Every mutation goes through [`DocumentStore::update`], which holds the
/// store's lock across read, mutate, and write-back. Requests sharing one
/// store are serialized, so a concurrent edit can no longer be overwritten
/// by a write based on a stale read. Separate processes writing the same
/// file are not coordinated.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DocumentStore {
    /// Store for the document of the project rooted at `root`.
    pub fn open(root: &Path) -> Self {
        Self::at(paths::document_path(root))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Full snapshot. A document that was never written reads as empty.
    pub fn read(&self) -> Result<Database> {
        let _guard = self.guard();
        self.load()
    }

    /// Overwrite the whole document.
    pub fn replace(&self, db: &Database) -> Result<()> {
        let _guard = self.guard();
        self.persist(db)
    }

    /// Write an empty document unless one exists. Returns true if written.
    pub fn init(&self) -> Result<bool> {
        let _guard = self.guard();
        if self.path.exists() {
            return Ok(false);
        }
        self.persist(&Database::default())?;
        Ok(true)
    }

    /// Read-modify-write under the store lock.
    ///
    /// `mutate` works on an in-memory copy; if it returns an error nothing is
    /// written and the document on disk is unchanged.
    pub fn update<T>(&self, mutate: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let _guard = self.guard();
        let mut db = self.load()?;
        let out = mutate(&mut db)?;
        self.persist(&db)?;
        Ok(out)
    }

    // A panic inside `mutate` happens before any write, so the document is
    // still consistent and the poisoned lock can be reused.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Database> {
        if !self.path.exists() {
            return Ok(Database::default());
        }
        let data = std::fs::read_to_string(&self.path).map_err(|e| self.unavailable("read", e))?;
        serde_json::from_str(&data).map_err(|e| self.unavailable("parse", e))
    }

    fn persist(&self, db: &Database) -> Result<()> {
        let data = serde_json::to_string_pretty(db).map_err(|e| self.unavailable("encode", e))?;
        crate::io::atomic_write(&self.path, data.as_bytes())
            .map_err(|e| self.unavailable("write", e))?;
        tracing::debug!(path = %self.path.display(), bytes = data.len(), "document written");
        Ok(())
    }

    fn unavailable(&self, op: &str, err: impl std::fmt::Display) -> PlannerError {
        PlannerError::StoreUnavailable(format!("{op} {}: {err}", self.path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
