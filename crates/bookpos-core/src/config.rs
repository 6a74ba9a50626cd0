//! # Pricing Configuration
//!
//! The fixed commercial constants behind every price computation, carried as
//! an explicit immutable value instead of compiled-in globals.
//!
//! ## Why a Value and Not Constants?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The margin rate, CNY coefficient and recommendation discount are       │
//! │  store policy, not arithmetic. Passing them in as a value means:        │
//! │                                                                         │
//! │    • tests can override a single knob without shared state              │
//! │    • the engine stays a pure function of its arguments                  │
//! │    • a future per-store config file only touches the call sites         │
//! │                                                                         │
//! │  `PricingConfig::default()` is production policy.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Base markup applied to a regular new book's listed price.
pub const MARGIN_RATE: f64 = 0.15;

/// Coefficient applied on the CNY leg when deriving the standard price.
///
/// The non-member price is deliberately anchored to the Chinese market's
/// price level rather than a flat markup over cost.
pub const CNY_COEFFICIENT: f64 = 0.3;

/// Extra member discount on staff-recommended books.
pub const RECOMMEND_DISCOUNT: f64 = 0.9;

/// Immutable pricing policy handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Markup over the listed price: `cost = price * (1 + margin_rate)`.
    pub margin_rate: f64,

    /// Standard-price coefficient on the AUD→CNY leg.
    pub cny_coefficient: f64,

    /// Member multiplier applied when a book is staff-recommended.
    pub recommend_discount: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            margin_rate: MARGIN_RATE,
            cny_coefficient: CNY_COEFFICIENT,
            recommend_discount: RECOMMEND_DISCOUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_store_policy() {
        let config = PricingConfig::default();
        assert_eq!(config.margin_rate, 0.15);
        assert_eq!(config.cny_coefficient, 0.3);
        assert_eq!(config.recommend_discount, 0.9);
    }
}
