//! # Sale Ledger
//!
//! Append-only persistence for committed sales.
//!
//! ## Storage Shape
//! One JSON array of [`SaleRecord`] in storage order (oldest first). The UI
//! may reverse for display; the file never does.
//!
//! ## Append Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append(record)                                                         │
//! │     1. read current array (corrupt/missing → empty, logged)             │
//! │     2. push the new record                                              │
//! │     3. serialize and write a temp file, rename over sales.json          │
//! │                                                                         │
//! │  Records are immutable once appended. The only removal is clear_all(),  │
//! │  and the CALLER must obtain explicit confirmation before invoking it;   │
//! │  this store performs no confirmation of its own.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use bookpos_core::SaleRecord;

use crate::error::StoreResult;
use crate::file::write_atomic;

/// Durable, append-only collection of committed sales.
#[derive(Debug, Clone)]
pub struct SaleStore {
    path: PathBuf,
}

impl SaleStore {
    /// Wraps the ledger file at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SaleStore { path: path.into() }
    }

    /// All committed sales, oldest first.
    ///
    /// A missing, unreadable or corrupt file degrades to an empty list
    /// (read-repair-by-ignoring); history display should never take the
    /// till down.
    pub fn list_all(&self) -> Vec<SaleRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "sale ledger unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "sale ledger corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Durably appends one record.
    ///
    /// Read-all, push, atomic write-all: an interrupted write leaves the
    /// previous ledger intact and loses at most the record being added,
    /// which the caller still holds and can retry.
    pub fn append(&self, record: &SaleRecord) -> StoreResult<()> {
        let mut records = self.list_all();
        records.push(record.clone());

        let bytes = serde_json::to_vec_pretty(&records)?;
        write_atomic(&self.path, &bytes)?;

        debug!(id = %record.id, total = records.len(), "sale appended to ledger");
        Ok(())
    }

    /// Removes every record. Irreversible.
    ///
    /// Callers MUST obtain an explicit, separate confirmation from the
    /// operator before invoking this; the store does not ask.
    pub fn clear_all(&self) -> StoreResult<()> {
        write_atomic(&self.path, b"[]")?;
        warn!(path = %self.path.display(), "sale ledger cleared");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
