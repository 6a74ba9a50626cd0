//! # Rate Service
//!
//! Owns the live [`RateTable`] and runs refreshes against a [`RateSource`].
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RateService Refresh                              │
//! │                                                                         │
//! │  spawn_refresh(source, outcomes)                                        │
//! │     │                                                                   │
//! │     ▼  tokio task (caller never blocks)                                 │
//! │  source.fetch() ──► snapshot.validate() ──► install new RateTable       │
//! │     │                     │                      │                      │
//! │     │ transport error     │ bad verdict /        │ write-lock swap,     │
//! │     ▼                     ▼ empty rates          ▼ stamped with now     │
//! │  RefreshOutcome::Failed (previous table kept)  RefreshOutcome::Updated  │
//! │     │                                            │                      │
//! │     └───────────── outcomes channel ─────────────┘                      │
//! │                                                                         │
//! │  Concurrent refreshes are safe: each installs a complete table, the     │
//! │  last write wins, and readers only ever see complete snapshots.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{info, warn};

use bookpos_core::RateTable;

use crate::source::RateSource;

// =============================================================================
// Refresh Outcome
// =============================================================================

/// What a single refresh attempt came to, for status display.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A new table is installed and in use.
    Updated {
        /// When the new snapshot was taken.
        as_of: DateTime<Utc>,
        /// Number of factors in the new table.
        rate_count: usize,
    },

    /// The refresh failed; whatever table was in use before is still in use.
    Failed {
        /// Human-readable reason, suitable for a status line.
        message: String,
        /// Whether trying again later is worthwhile.
        retryable: bool,
    },
}

impl RefreshOutcome {
    /// True when the refresh installed a new table.
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }
}

// =============================================================================
// Rate Service
// =============================================================================

/// Shared holder of the current exchange-rate snapshot.
///
/// Cheap to clone; all clones see the same table. Starts empty, which keeps
/// regular new books unpriceable until the first successful refresh while
/// face-value items (used, rental) work immediately.
#[derive(Debug, Clone, Default)]
pub struct RateService {
    table: Arc<RwLock<RateTable>>,
}

impl RateService {
    /// A service with no rates yet.
    pub fn new() -> Self {
        RateService::default()
    }

    /// A service seeded with an existing table (tests, cached startup state).
    pub fn with_table(table: RateTable) -> Self {
        RateService {
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// The current snapshot, cloned out so pricing never holds the lock.
    pub fn current(&self) -> RateTable {
        self.table.read().expect("rate table lock poisoned").clone()
    }

    /// Fetches from `source` and, on success, swaps in the new table.
    ///
    /// Any failure leaves the previously installed table untouched; the
    /// outcome says which way it went.
    pub async fn refresh<S: RateSource>(&self, source: &S) -> RefreshOutcome {
        let snapshot = match source.fetch().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "exchange rate fetch failed");
                return RefreshOutcome::Failed {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                };
            }
        };

        let snapshot = match snapshot.validate() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "exchange rate response rejected");
                return RefreshOutcome::Failed {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                };
            }
        };

        let as_of = Utc::now();
        let rate_count = snapshot.rates.len();
        let table = RateTable::new(as_of, snapshot.rates);

        *self.table.write().expect("rate table lock poisoned") = table;

        info!(%as_of, rate_count, "exchange rates updated");
        RefreshOutcome::Updated { as_of, rate_count }
    }

    /// Runs a refresh on a background task, delivering the outcome over
    /// `outcomes` when it finishes. Returns immediately.
    ///
    /// A dropped receiver only loses the notification; the table swap has
    /// already happened by then.
    pub fn spawn_refresh<S>(&self, source: Arc<S>, outcomes: mpsc::Sender<RefreshOutcome>)
    where
        S: RateSource + 'static,
    {
        let service = self.clone();
        tokio::spawn(async move {
            let outcome = service.refresh(source.as_ref()).await;
            let _ = outcomes.send(outcome).await;
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RateError, RateResult};
    use crate::source::RateSnapshot;
    use bookpos_core::Currency;
    use std::collections::HashMap;

    /// Source that always returns the same canned snapshot.
    struct FixedSource(RateSnapshot);

    impl RateSource for FixedSource {
        async fn fetch(&self) -> RateResult<RateSnapshot> {
            Ok(self.0.clone())
        }
    }

    /// Source that always fails at the transport level.
    struct BrokenSource;

    impl RateSource for BrokenSource {
        async fn fetch(&self) -> RateResult<RateSnapshot> {
            Err(RateError::EmptyPayload)
        }
    }

    fn good_snapshot() -> RateSnapshot {
        RateSnapshot {
            result: "success".to_string(),
            rates: HashMap::from([
                ("JPY".to_string(), 100.0),
                ("CNY".to_string(), 5.0),
                ("AUD".to_string(), 1.0),
            ]),
        }
    }

    #[tokio::test]
    async fn test_refresh_installs_a_ready_table() {
        let service = RateService::new();
        assert!(!service.current().is_ready());

        let outcome = service.refresh(&FixedSource(good_snapshot())).await;
        assert!(matches!(
            outcome,
            RefreshOutcome::Updated { rate_count: 3, .. }
        ));

        let table = service.current();
        assert!(table.is_ready());
        assert_eq!(table.factor(Currency::Jpy), Some(100.0));
        assert!(table.as_of().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_the_previous_table() {
        let service = RateService::new();
        service.refresh(&FixedSource(good_snapshot())).await;
        let before = service.current();

        let outcome = service.refresh(&BrokenSource).await;
        assert!(!outcome.is_updated());
        assert_eq!(service.current(), before);
    }

    #[tokio::test]
    async fn test_non_success_verdict_is_a_failure() {
        let service = RateService::new();
        let outcome = service
            .refresh(&FixedSource(RateSnapshot {
                result: "error".to_string(),
                rates: HashMap::from([("JPY".to_string(), 100.0)]),
            }))
            .await;

        assert!(matches!(
            outcome,
            RefreshOutcome::Failed { retryable: true, .. }
        ));
        assert!(!service.current().is_ready());
    }

    #[tokio::test]
    async fn test_empty_success_payload_never_wipes_rates() {
        let service = RateService::new();
        service.refresh(&FixedSource(good_snapshot())).await;

        let outcome = service
            .refresh(&FixedSource(RateSnapshot {
                result: "success".to_string(),
                rates: HashMap::new(),
            }))
            .await;

        assert!(!outcome.is_updated());
        assert!(service.current().is_ready());
    }

    #[tokio::test]
    async fn test_refresh_replaces_the_table_wholesale() {
        let service = RateService::new();
        service.refresh(&FixedSource(good_snapshot())).await;

        // Second snapshot without JPY: the old JPY factor must not linger.
        service
            .refresh(&FixedSource(RateSnapshot {
                result: "success".to_string(),
                rates: HashMap::from([("CNY".to_string(), 4.5)]),
            }))
            .await;

        let table = service.current();
        assert_eq!(table.factor(Currency::Jpy), None);
        assert_eq!(table.factor(Currency::Cny), Some(4.5));
    }

    #[tokio::test]
    async fn test_spawn_refresh_delivers_outcome_over_channel() {
        let service = RateService::new();
        let (tx, mut rx) = mpsc::channel(1);

        service.spawn_refresh(Arc::new(FixedSource(good_snapshot())), tx);

        let outcome = rx.recv().await.unwrap();
        assert!(outcome.is_updated());
        assert!(service.current().is_ready());
    }

    #[tokio::test]
    async fn test_clones_share_one_table() {
        let service = RateService::new();
        let observer = service.clone();

        service.refresh(&FixedSource(good_snapshot())).await;
        assert!(observer.current().is_ready());
    }
}
