//! # Error Types
//!
//! Domain-specific error types for bookpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookpos-core errors (this file)                                       │
//! │  ├── PricingError     - Missing exchange factors                       │
//! │  ├── CommitBlocker    - One human-readable reason a commit is blocked  │
//! │  ├── ValidationError  - Field-level input failures                     │
//! │  └── CoreError        - Umbrella for draft operations                  │
//! │                                                                         │
//! │  bookpos-store errors (separate crate)                                 │
//! │  └── StoreError       - Ledger read/write failures                     │
//! │                                                                         │
//! │  bookpos-rates errors (separate crate)                                 │
//! │  └── RateError        - Refresh transport/API failures                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every message names the cause and, where one exists, the remedy
//! 3. Nothing in this core terminates the process; commit blockers are a
//!    list the UI reads back to the operator, never a panic

use thiserror::Error;

use crate::types::Currency;

// =============================================================================
// Pricing Error
// =============================================================================

/// A price computation that cannot proceed.
///
/// Only regular new books can fail to price: the table is missing a factor
/// the conversion needs. There is deliberately no 1:1 fallback; a silently
/// mis-priced book is worse than a blocked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The book's own currency has no usable factor in the table.
    #[error("exchange rate for {currency} is unavailable: refresh rates and retry")]
    MissingRate { currency: Currency },

    /// The CNY reference factor (standard-price anchor) is absent.
    #[error("CNY reference rate is unavailable: refresh rates and retry")]
    MissingReferenceRate,
}

// =============================================================================
// Commit Blocker
// =============================================================================

/// One reason a draft sale cannot be committed.
///
/// Blockers are collected into a list and surfaced whole, so the operator
/// fixes everything in one pass instead of replaying commit attempts.
/// `position` is 1-based, matching what the item list displays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitBlocker {
    #[error("book {position}: title is required")]
    MissingTitle { position: usize },

    #[error("book {position} ({title}): manager is required")]
    MissingManager { position: usize, title: String },

    #[error("book {position} ({title}): price must be greater than zero")]
    NonPositivePrice { position: usize, title: String },

    #[error("sale has no books")]
    NoItems,

    #[error("sale type not chosen: pick member or standard")]
    SaleTypeNotChosen,

    /// Distinct from input errors: the draft itself is fine, the rate
    /// table is not ready for the conversion the sale needs.
    #[error("exchange rates unavailable: refresh rates and retry")]
    RatesUnavailable,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation failures.
///
/// Used by the input layer before values ever reach a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for draft-sale operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Commit was attempted while validation failures remain.
    /// The draft is left unchanged; `blockers` is never empty.
    #[error("sale cannot be committed: {} problem(s) found", .blockers.len())]
    CommitBlocked { blockers: Vec<CommitBlocker> },

    /// A referenced line item is not in the draft (stale UI reference).
    #[error("no line item with id {id} in the draft")]
    UnknownItem { id: String },

    /// A computation failed mid-commit. Validation runs first, so this
    /// only surfaces when the rate table was swapped between the two.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
