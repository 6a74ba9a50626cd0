//! # Store Error Types
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  READS   degrade: unreadable or corrupt files come back as empty       │
//! │          data (logged), because a crash at the till is worse than a    │
//! │          blank history panel.                                          │
//! │                                                                         │
//! │  WRITES  report: the caller gets a StoreError and keeps its in-memory  │
//! │          draft so the operator can retry. The previously durable file  │
//! │          is never left half-written (temp + rename).                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors from ledger and registry writes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure (permissions, disk full, rename failure).
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded for persistence.
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),

    /// A manager name was rejected before it reached the registry file.
    #[error(transparent)]
    InvalidName(#[from] bookpos_core::ValidationError),

    /// CSV export failure.
    #[error("failed to write export file: {0}")]
    Export(#[from] csv::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
