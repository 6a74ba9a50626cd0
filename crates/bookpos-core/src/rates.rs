//! # Rate Table
//!
//! An immutable snapshot of exchange factors the pricing engine reads.
//!
//! ## Factor Direction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  factor = units of that currency per 1 AUD                              │
//! │                                                                         │
//! │    JPY: 100.0   means  100 yen  = 1 AUD   →  AUD = native / factor      │
//! │    CNY: 5.0     means  5 yuan   = 1 AUD                                 │
//! │    AUD          implicit 1.0, never looked up                           │
//! │                                                                         │
//! │  A missing factor is an ERROR at the pricing layer, never a silent      │
//! │  1:1 conversion. AUD is the single exemption.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Replaced wholesale on each successful refresh (see bookpos-rates), read
//! concurrently by any number of pricing calls, never mutated in place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::Currency;

/// Snapshot of currency → AUD exchange factors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    /// When the snapshot was taken; `None` means never refreshed.
    as_of: Option<DateTime<Utc>>,

    /// Factors keyed by ISO code. May contain codes beyond the supported
    /// set; lookups only ever use [`Currency`] codes.
    factors: HashMap<String, f64>,
}

impl RateTable {
    /// An unset table: nothing can be priced except face-value items.
    pub fn empty() -> Self {
        RateTable::default()
    }

    /// Builds a snapshot from a refresh payload.
    pub fn new(as_of: DateTime<Utc>, factors: HashMap<String, f64>) -> Self {
        RateTable {
            as_of: Some(as_of),
            factors,
        }
    }

    /// Builds a table from code/factor pairs. Handy for tests and for
    /// collaborators that inject fixed rates.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        RateTable {
            as_of: Some(Utc::now()),
            factors: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// When the snapshot was taken.
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }

    /// The usable factor for a currency.
    ///
    /// AUD always resolves to 1.0. Every other currency requires a present,
    /// strictly positive entry; anything else is `None` and the caller must
    /// treat the computation as failed.
    pub fn factor(&self, currency: Currency) -> Option<f64> {
        if currency.is_settlement() {
            return Some(1.0);
        }
        self.factors
            .get(currency.code())
            .copied()
            .filter(|f| f.is_finite() && *f > 0.0)
    }

    /// The CNY factor anchoring every standard price.
    pub fn reference_factor(&self) -> Option<f64> {
        self.factor(Currency::Cny)
    }

    /// Whether the table can price regular new books: non-empty with a
    /// usable CNY reference factor.
    pub fn is_ready(&self) -> bool {
        !self.factors.is_empty() && self.reference_factor().is_some()
    }

    /// Number of factors in the snapshot.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the snapshot holds no factors at all.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::from_pairs([("JPY", 100.0), ("CNY", 5.0), ("AUD", 1.0)])
    }

    #[test]
    fn test_aud_is_always_one() {
        assert_eq!(RateTable::empty().factor(Currency::Aud), Some(1.0));
        assert_eq!(table().factor(Currency::Aud), Some(1.0));
    }

    #[test]
    fn test_missing_factor_is_none_not_one() {
        let rates = table();
        assert_eq!(rates.factor(Currency::Sgd), None);
        assert_eq!(rates.factor(Currency::Jpy), Some(100.0));
    }

    #[test]
    fn test_non_positive_factors_are_unusable() {
        let rates = RateTable::from_pairs([("JPY", 0.0), ("CNY", -5.0)]);
        assert_eq!(rates.factor(Currency::Jpy), None);
        assert_eq!(rates.factor(Currency::Cny), None);
        assert!(!rates.is_ready());
    }

    #[test]
    fn test_readiness_requires_cny() {
        assert!(!RateTable::empty().is_ready());
        assert!(!RateTable::from_pairs([("JPY", 100.0)]).is_ready());
        assert!(table().is_ready());
    }

    #[test]
    fn test_empty_table_has_no_timestamp() {
        assert_eq!(RateTable::empty().as_of(), None);
        assert!(table().as_of().is_some());
    }
}
