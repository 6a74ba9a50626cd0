//! # bookpos-store: Durable Ledger for Book POS
//!
//! Persistence for committed sales and the manager registry, plus the CSV
//! export writer. Everything is plain JSON on disk, rewritten atomically.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Book POS Storage                                 │
//! │                                                                         │
//! │  DraftSale::commit() ──► SaleRecord                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bookpos-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌─────────────────┐   ┌──────────────┐   │   │
//! │  │   │   SaleStore   │   │ ManagerRegistry │   │    export    │   │   │
//! │  │   │  (sales.rs)   │   │  (managers.rs)  │   │ (export.rs)  │   │   │
//! │  │   │               │   │                 │   │              │   │   │
//! │  │   │ append        │   │ list / add      │   │ CSV rows     │   │   │
//! │  │   │ list_all      │   │ "Kelly" default │   │              │   │   │
//! │  │   │ clear_all     │   │                 │   │              │   │   │
//! │  │   └───────┬───────┘   └────────┬────────┘   └──────┬───────┘   │   │
//! │  └───────────┼────────────────────┼─────────────────── ┼──────────┘   │
//! │              ▼                    ▼                     ▼              │
//! │         sales.json           managers.json         export.csv          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Durability Model
//! Append = read-all, push, write-all through a temp file renamed over the
//! original. The previously durable file is only replaced by a fully
//! written successor, so a crash mid-write loses at most the new record.
//!
//! ## Usage
//! ```rust,no_run
//! use bookpos_store::DataStore;
//!
//! let store = DataStore::open("./data")?;
//! let records = store.sales().list_all();
//! let managers = store.managers().list();
//! # Ok::<(), bookpos_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod managers;
pub mod sales;

mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use managers::ManagerRegistry;
pub use sales::SaleStore;

use std::path::Path;

/// File name of the sale ledger inside the data directory.
pub const SALES_FILE: &str = "sales.json";

/// File name of the manager registry inside the data directory.
pub const MANAGERS_FILE: &str = "managers.json";

/// The store's two persistent collections, rooted in one data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    sales: SaleStore,
    managers: ManagerRegistry,
}

impl DataStore {
    /// Opens (creating if needed) the data directory and wires up both
    /// collections. Files themselves are created lazily on first write.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(DataStore {
            sales: SaleStore::new(dir.join(SALES_FILE)),
            managers: ManagerRegistry::new(dir.join(MANAGERS_FILE)),
        })
    }

    /// The sale ledger.
    pub fn sales(&self) -> &SaleStore {
        &self.sales
    }

    /// The manager registry.
    pub fn managers(&self) -> &ManagerRegistry {
        &self.managers
    }
}
