//! # bookpos-core: Pure Business Logic for Book POS
//!
//! This crate is the **heart** of Book POS. It turns a book's listed price
//! (in one of several foreign currencies) into two AUD sale prices and
//! carries a sale from draft to immutable committed record.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Book POS Data Flow                               │
//! │                                                                         │
//! │  UI collaborator (out of scope)                                         │
//! │       │  add / edit / remove line items                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ bookpos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌─────────┐  ┌─────────┐  ┌──────────────┐    │   │
//! │  │   │ pricing  │  │  draft  │  │ report  │  │  validation  │    │   │
//! │  │   │  engine  │  │  sale   │  │  aggr.  │  │   coercion   │    │   │
//! │  │   └──────────┘  └─────────┘  └─────────┘  └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │ commit                              ▲ RateTable snapshot       │
//! │       ▼                                     │                          │
//! │  bookpos-store (JSON ledger)          bookpos-rates (FX refresh)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Currency, Category, LineItem, SaleRecord)
//! - [`config`] - Pricing constants as an explicit immutable value
//! - [`rates`] - The RateTable snapshot the engine prices against
//! - [`pricing`] - The member/standard price computation
//! - [`draft`] - The in-progress sale and its commit lifecycle
//! - [`report`] - Filters, aggregation and export rows over records
//! - [`validation`] - Field validation and input coercion rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: pricing is deterministic given its inputs
//! 2. **No I/O**: storage and network live in the sibling crates
//! 3. **Explicit configuration**: constants travel as [`config::PricingConfig`],
//!    never as mutable globals
//! 4. **Fail on missing rates**: a currency absent from the table is an error,
//!    never a silent 1:1 conversion
//!
//! ## Example Usage
//!
//! ```rust
//! use bookpos_core::config::PricingConfig;
//! use bookpos_core::pricing::compute_price;
//! use bookpos_core::rates::RateTable;
//! use bookpos_core::types::Currency;
//!
//! let config = PricingConfig::default();
//! let rates = RateTable::from_pairs([("JPY", 100.0), ("CNY", 5.0)]);
//!
//! // A regular new book listed at 1000 JPY
//! let quote = compute_price(1000.0, Currency::Jpy, false, false, false, &config, &rates)
//!     .expect("rates present");
//!
//! assert!((quote.member - 11.50).abs() < 0.01);
//! assert!((quote.standard - 17.25).abs() < 0.01);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod draft;
pub mod error;
pub mod pricing;
pub mod rates;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bookpos_core::DraftSale` instead of
// `use bookpos_core::draft::DraftSale`

pub use config::PricingConfig;
pub use draft::{DraftSale, DraftTotals};
pub use error::{CommitBlocker, CoreError, CoreResult, PricingError, ValidationError};
pub use pricing::{compute_price, price_item, PriceQuote};
pub use rates::RateTable;
pub use types::{BookSnapshot, Category, Currency, LineItem, SaleRecord, SaleType};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Manager name seeded into an empty registry.
///
/// ## Why a constant?
/// The registry must never be empty (every committed book carries a manager
/// attribution), so a fresh install starts with the owner's display name.
pub const DEFAULT_MANAGER: &str = "Kelly";

/// Maximum length of a book title.
///
/// ## Business Reason
/// Prevents pathological titles from unbounded paste; generous enough for
/// full Japanese light-novel titles.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a manager display name.
pub const MAX_MANAGER_LEN: usize = 50;
