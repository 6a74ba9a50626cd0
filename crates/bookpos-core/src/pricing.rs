//! # Pricing Engine
//!
//! Converts one line item's (price, currency, flags) into a member and a
//! standard price in AUD, given a [`RateTable`] snapshot.
//!
//! ## Computation Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     compute_price decision tree                         │
//! │                                                                         │
//! │  price <= 0 ──────────────────────────────► (0, 0)                      │
//! │                                                                         │
//! │  used / rental ───────────────────────────► (price, price)              │
//! │      face value in AUD, caller owns the currency==AUD invariant         │
//! │                                                                         │
//! │  regular new book:                                                      │
//! │      cost      = price × (1 + margin_rate)                              │
//! │      member    = cost / factor(currency)        ← fails if absent       │
//! │      standard  = member × factor(CNY) × coeff   ← fails if CNY absent   │
//! │                                                                         │
//! │      recommended?  standard := member                                   │
//! │                    member   := member × recommend_discount              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The standard price is anchored to the Chinese market's price level
//! through the CNY leg rather than a flat markup over cost; that is store
//! policy, not an implementation accident.
//!
//! Pure function: no I/O, no shared mutable state, deterministic given its
//! inputs. Safe to call concurrently against the same RateTable.

use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::rates::RateTable;
use crate::types::{Currency, LineItem, SaleType};

// =============================================================================
// Price Quote
// =============================================================================

/// The two AUD sale prices computed for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceQuote {
    /// Discounted price available to store members.
    pub member: f64,

    /// Non-member price.
    pub standard: f64,
}

impl PriceQuote {
    /// The zero quote returned for not-yet-real line items.
    pub const ZERO: PriceQuote = PriceQuote {
        member: 0.0,
        standard: 0.0,
    };

    /// The price the sale settles at for a given sale type.
    pub fn settled(&self, sale_type: SaleType) -> f64 {
        match sale_type {
            SaleType::Member => self.member,
            SaleType::Standard => self.standard,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Computes the (member, standard) AUD prices for one item.
///
/// ## Contract
/// - `native_price <= 0` returns [`PriceQuote::ZERO`]; not an error, the
///   item simply isn't real yet.
/// - Used/rental items return `(native_price, native_price)` with no
///   conversion, markup or discount. The engine does not check that their
///   currency is AUD; that invariant belongs to the item constructors.
/// - Regular new books fail with [`PricingError`] when a required factor is
///   absent from the table. No silent 1:1 fallback exists.
///
/// ## Guarantee
/// For regular new books under production constants, `standard >= member`.
pub fn compute_price(
    native_price: f64,
    currency: Currency,
    is_recommended: bool,
    is_used: bool,
    is_rental: bool,
    config: &PricingConfig,
    rates: &RateTable,
) -> Result<PriceQuote, PricingError> {
    if native_price <= 0.0 {
        return Ok(PriceQuote::ZERO);
    }

    if is_used || is_rental {
        return Ok(PriceQuote {
            member: native_price,
            standard: native_price,
        });
    }

    // Regular new book: markup, then convert to AUD.
    let cost_native = native_price * (1.0 + config.margin_rate);
    let factor = rates
        .factor(currency)
        .ok_or(PricingError::MissingRate { currency })?;
    let base_member = cost_native / factor;

    // Standard baseline via the CNY reference leg.
    let cny_factor = rates
        .reference_factor()
        .ok_or(PricingError::MissingReferenceRate)?;
    let base_standard = base_member * cny_factor * config.cny_coefficient;

    if is_recommended {
        // Staff pick: non-members pay the member baseline and members get
        // a further discount on it.
        Ok(PriceQuote {
            member: base_member * config.recommend_discount,
            standard: base_member,
        })
    } else {
        Ok(PriceQuote {
            member: base_member,
            standard: base_standard,
        })
    }
}

/// Prices a [`LineItem`] directly.
pub fn price_item(
    item: &LineItem,
    config: &PricingConfig,
    rates: &RateTable,
) -> Result<PriceQuote, PricingError> {
    compute_price(
        item.native_price,
        item.currency,
        item.is_recommended,
        item.is_used,
        item.is_rental,
        config,
        rates,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
