//! # bookpos-rates: Exchange-Rate Refresh Service
//!
//! Fetches AUD-based exchange rates and maintains the live [`RateTable`]
//! snapshot the pricing engine reads.
//!
//! ## Crate Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           bookpos-rates                                 │
//! │                                                                         │
//! │  ┌─────────────────┐      ┌─────────────────┐      ┌────────────────┐  │
//! │  │    source.rs    │      │   service.rs    │      │    error.rs    │  │
//! │  │                 │      │                 │      │                │  │
//! │  │  RateSource     │ ───► │  RateService    │      │  RateError     │  │
//! │  │  ErApiSource    │      │  RefreshOutcome │      │                │  │
//! │  │  RateSnapshot   │      │                 │      │                │  │
//! │  └─────────────────┘      └────────┬────────┘      └────────────────┘  │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                       bookpos_core::RateTable                           │
//! │                   (Arc<RwLock<_>> snapshot swap)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```no_run
//! use std::sync::Arc;
//! use bookpos_rates::{ErApiSource, RateService};
//!
//! # async fn demo() {
//! let service = RateService::new();
//! let (tx, mut rx) = tokio::sync::mpsc::channel(1);
//!
//! service.spawn_refresh(Arc::new(ErApiSource::new()), tx);
//!
//! if let Some(outcome) = rx.recv().await {
//!     println!("refresh finished: {:?}", outcome);
//! }
//! let rates = service.current();
//! # }
//! ```

pub mod error;
pub mod service;
pub mod source;

pub use error::{RateError, RateResult};
pub use service::{RateService, RefreshOutcome};
pub use source::{ErApiSource, RateSnapshot, RateSource, DEFAULT_RATE_URL, FETCH_TIMEOUT};

// Re-exported so callers holding a snapshot do not need a direct
// bookpos-core dependency just to name the type.
pub use bookpos_core::RateTable;
