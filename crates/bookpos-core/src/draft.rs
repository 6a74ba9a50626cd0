//! # Draft Sale
//!
//! The in-progress, uncommitted basket of line items.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Draft Sale Lifecycle                              │
//! │                                                                         │
//! │  1. ASSEMBLE                                                            │
//! │     └── add_item / update_item / remove_item                            │
//! │     └── totals() recomputes from the item list on every call            │
//! │                                                                         │
//! │  2. CHOOSE                                                              │
//! │     └── set_sale_type(Member | Standard)                                │
//! │                                                                         │
//! │  3. CHECK                                                               │
//! │     └── validate_for_commit() → list of blockers (may be empty)         │
//! │     └── detect_duplicate_titles() → advisory, never blocks              │
//! │                                                                         │
//! │  4. COMMIT                                                              │
//! │     └── commit() → SaleRecord snapshot, draft cleared                   │
//! │         (validation failure: no record, draft untouched)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals Invariant
//! Totals are never cached independently of the item list: `totals()` sums
//! `compute_price` over the current items against the RateTable snapshot it
//! is handed, so they cannot drift from the items. An item the table cannot
//! price contributes zero to draft totals; committing it is blocked instead.

use std::collections::{BTreeSet, HashSet};

use chrono::Utc;

use crate::config::PricingConfig;
use crate::error::{CommitBlocker, CoreError, CoreResult};
use crate::pricing::price_item;
use crate::rates::RateTable;
use crate::types::{generate_record_id, BookSnapshot, Category, Currency, LineItem, SaleRecord, SaleType};

// =============================================================================
// Draft Totals
// =============================================================================

/// Aggregate totals over the draft's current items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DraftTotals {
    pub member: f64,
    pub standard: f64,
}

// =============================================================================
// Item Update
// =============================================================================

/// Partial edit applied to one line item. `None` fields are left alone.
///
/// The item kind (used/rental) is fixed at creation; an operator who picked
/// the wrong kind deletes the row and adds a new one, same as the original
/// card UI.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub manager: Option<String>,
    pub native_price: Option<f64>,
    pub currency: Option<Currency>,
    pub is_recommended: Option<bool>,
}

// =============================================================================
// Draft Sale
// =============================================================================

/// An ordered collection of line items being assembled before commit.
///
/// Created empty at session start and after each commit. One draft per
/// running instance; mutations happen on a single control thread.
#[derive(Debug, Clone, Default)]
pub struct DraftSale {
    items: Vec<LineItem>,
    /// `None` until the operator picks member or standard ("Unset").
    sale_type: Option<SaleType>,
}

impl DraftSale {
    /// Creates an empty draft with no sale type chosen.
    pub fn new() -> Self {
        DraftSale::default()
    }

    /// The current items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The chosen sale type, if any.
    pub fn sale_type(&self) -> Option<SaleType> {
        self.sale_type
    }

    /// Picks how the sale will settle.
    pub fn set_sale_type(&mut self, sale_type: SaleType) {
        self.sale_type = Some(sale_type);
    }

    /// Appends an item and returns its draft-local id.
    pub fn add_item(&mut self, item: LineItem) -> String {
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Removes the item with the given id.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Err(CoreError::UnknownItem { id: id.to_string() });
        }
        Ok(())
    }

    /// Applies a partial edit to the item with the given id.
    pub fn update_item(&mut self, id: &str, update: ItemUpdate) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::UnknownItem { id: id.to_string() })?;

        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(manager) = update.manager {
            item.manager = manager;
        }
        if let Some(price) = update.native_price {
            item.native_price = price;
        }
        if let Some(currency) = update.currency {
            item.currency = currency;
        }
        if let Some(flag) = update.is_recommended {
            item.is_recommended = flag;
        }
        Ok(())
    }

    /// Discards every item and the chosen sale type.
    pub fn clear(&mut self) {
        self.items.clear();
        self.sale_type = None;
    }

    /// Recomputes aggregate totals by pricing every current item.
    ///
    /// Items the table cannot price contribute zero here; they surface as
    /// a [`CommitBlocker::RatesUnavailable`] at validation time instead.
    pub fn totals(&self, config: &PricingConfig, rates: &RateTable) -> DraftTotals {
        let mut totals = DraftTotals::default();
        for item in &self.items {
            if let Ok(quote) = price_item(item, config, rates) {
                totals.member += quote.member;
                totals.standard += quote.standard;
            }
        }
        totals
    }

    /// Checks everything commit requires and returns every failure found.
    ///
    /// Per item: non-empty title, non-empty manager, positive price.
    /// Sale level: at least one item, a chosen sale type, and a ready rate
    /// table whenever any regular new book needs conversion. Rate
    /// unavailability is a distinct blocker, never folded into input errors.
    pub fn validate_for_commit(
        &self,
        _config: &PricingConfig,
        rates: &RateTable,
    ) -> Vec<CommitBlocker> {
        let mut blockers = Vec::new();

        for (index, item) in self.items.iter().enumerate() {
            let position = index + 1;
            let title = item.title.trim();

            if title.is_empty() {
                blockers.push(CommitBlocker::MissingTitle { position });
            }
            if item.manager.trim().is_empty() {
                blockers.push(CommitBlocker::MissingManager {
                    position,
                    title: title.to_string(),
                });
            }
            if item.native_price <= 0.0 {
                blockers.push(CommitBlocker::NonPositivePrice {
                    position,
                    title: title.to_string(),
                });
            }
        }

        if self.items.is_empty() {
            blockers.push(CommitBlocker::NoItems);
        }
        if self.sale_type.is_none() {
            blockers.push(CommitBlocker::SaleTypeNotChosen);
        }
        if self.items.iter().any(LineItem::needs_rates) && !rates.is_ready() {
            blockers.push(CommitBlocker::RatesUnavailable);
        }

        blockers
    }

    /// Titles appearing more than once in the draft.
    ///
    /// Advisory only: the caller asks the operator to confirm, it never
    /// blocks commit. Comparison is on the trimmed title; blanks are
    /// ignored (they are a validation failure, not a duplicate).
    pub fn detect_duplicate_titles(&self) -> BTreeSet<String> {
        let mut seen = HashSet::new();
        let mut duplicates = BTreeSet::new();
        for item in &self.items {
            let title = item.title.trim();
            if title.is_empty() {
                continue;
            }
            if !seen.insert(title) {
                duplicates.insert(title.to_string());
            }
        }
        duplicates
    }

    /// Commits the draft into an immutable [`SaleRecord`] and clears it.
    ///
    /// Validation runs first; any blocker aborts with
    /// [`CoreError::CommitBlocked`], producing no record and leaving the
    /// draft unchanged.
    pub fn commit(&mut self, config: &PricingConfig, rates: &RateTable) -> CoreResult<SaleRecord> {
        let blockers = self.validate_for_commit(config, rates);
        if !blockers.is_empty() {
            return Err(CoreError::CommitBlocked { blockers });
        }
        // Validation guarantees a chosen type.
        let sale_type = self.sale_type.expect("validated sale type");

        let mut books = Vec::with_capacity(self.items.len());
        let mut total_member = 0.0;
        let mut total_standard = 0.0;

        for item in &self.items {
            let quote = price_item(item, config, rates)?;
            total_member += quote.member;
            total_standard += quote.standard;
            books.push(BookSnapshot {
                title: item.title.trim().to_string(),
                category: item.category,
                manager: item.manager.trim().to_string(),
                original_price: item.native_price,
                currency: item.currency,
                is_recommend: item.is_recommended,
                is_used: item.is_used,
                is_rental: item.is_rental,
                member_price: quote.member,
                standard_price: quote.standard,
                final_price: quote.settled(sale_type),
            });
        }

        let timestamp = Utc::now();
        let actual_revenue = match sale_type {
            SaleType::Member => total_member,
            SaleType::Standard => total_standard,
        };
        let record = SaleRecord {
            id: generate_record_id(timestamp),
            timestamp,
            books,
            sale_type,
            total_member_price: total_member,
            total_standard_price: total_standard,
            actual_revenue,
        };

        self.clear();
        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
