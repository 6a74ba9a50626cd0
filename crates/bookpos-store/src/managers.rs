//! # Manager Registry
//!
//! A small durable set of manager display names for sale attribution.
//!
//! ## Semantics
//! - Insertion-ordered, distinct, grows monotonically via explicit add.
//! - Never auto-removes; never empty: a missing or corrupt file yields the
//!   default `["Kelly"]`.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use bookpos_core::validation::validate_manager_name;
use bookpos_core::DEFAULT_MANAGER;

use crate::error::StoreResult;
use crate::file::write_atomic;

/// Durable, insertion-ordered set of manager names.
#[derive(Debug, Clone)]
pub struct ManagerRegistry {
    path: PathBuf,
}

impl ManagerRegistry {
    /// Wraps the registry file at `path`; created on first add.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ManagerRegistry { path: path.into() }
    }

    /// Every registered name, insertion order, default included.
    ///
    /// Missing/corrupt/empty files all come back as the default list so a
    /// sale can always be attributed to someone.
    pub fn list(&self) -> Vec<String> {
        let names: Vec<String> = match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(names) => names,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "manager registry corrupt, using default");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "manager registry unreadable, using default");
                Vec::new()
            }
        };

        if names.is_empty() {
            vec![DEFAULT_MANAGER.to_string()]
        } else {
            names
        }
    }

    /// Adds a name to the registry.
    ///
    /// Returns `true` if the name was new, `false` if it was already
    /// present (no write happens). Rejects empty/over-long names before
    /// they ever reach the file.
    pub fn add(&self, name: &str) -> StoreResult<bool> {
        validate_manager_name(name)?;
        let name = name.trim();

        let mut names = self.list();
        if names.iter().any(|existing| existing == name) {
            return Ok(false);
        }
        names.push(name.to_string());

        let bytes = serde_json::to_vec_pretty(&names)?;
        write_atomic(&self.path, &bytes)?;

        debug!(%name, total = names.len(), "manager added to registry");
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
