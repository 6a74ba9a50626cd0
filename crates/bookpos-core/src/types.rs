//! # Domain Types
//!
//! Core domain types used throughout Book POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  BookSnapshot   │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (uuid)      │   │  input fields + │   │  id (time+uuid) │       │
//! │  │  title, price   │──►│  member_price   │──►│  books[]        │       │
//! │  │  currency,flags │   │  standard_price │   │  totals/revenue │       │
//! │  │  (mutable)      │   │  final_price    │   │  (immutable)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │       in draft            frozen at commit       persisted             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Currency     │   │    Category     │   │    SaleType     │       │
//! │  │  JPY SGD MYR    │   │  literature ... │   │  Member         │       │
//! │  │  HKD TWD CNY    │   │  (closed set)   │   │  Standard       │       │
//! │  │  AUD            │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` is mutated freely while in the draft. At commit it is frozen
//! into a `BookSnapshot` (input fields plus both computed prices) and never
//! referenced by the draft again.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Currency
// =============================================================================

/// The closed set of currencies a book may be listed in.
///
/// AUD is the settlement currency: every computed price resolves to AUD and
/// AUD itself carries an implicit exchange factor of 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Jpy,
    Sgd,
    Myr,
    Hkd,
    Twd,
    Cny,
    Aud,
}

impl Currency {
    /// Every supported currency, in the order the UI lists them.
    pub const ALL: [Currency; 7] = [
        Currency::Jpy,
        Currency::Sgd,
        Currency::Myr,
        Currency::Hkd,
        Currency::Twd,
        Currency::Cny,
        Currency::Aud,
    ];

    /// The ISO 4217 code, as used in rate-table keys and persisted records.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Jpy => "JPY",
            Currency::Sgd => "SGD",
            Currency::Myr => "MYR",
            Currency::Hkd => "HKD",
            Currency::Twd => "TWD",
            Currency::Cny => "CNY",
            Currency::Aud => "AUD",
        }
    }

    /// Whether this is the settlement currency (exempt from table lookup).
    pub const fn is_settlement(&self) -> bool {
        matches!(self, Currency::Aud)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JPY" => Ok(Currency::Jpy),
            "SGD" => Ok(Currency::Sgd),
            "MYR" => Ok(Currency::Myr),
            "HKD" => Ok(Currency::Hkd),
            "TWD" => Ok(Currency::Twd),
            "CNY" => Ok(Currency::Cny),
            "AUD" => Ok(Currency::Aud),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Shelf category of a book. A fixed closed set; reporting splits by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Literature,
    History,
    Science,
    Children,
    Lifestyle,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Literature,
        Category::History,
        Category::Science,
        Category::Children,
        Category::Lifestyle,
        Category::Other,
    ];

    /// Human-readable label for display and export.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Literature => "Literature",
            Category::History => "History",
            Category::Science => "Science",
            Category::Children => "Children",
            Category::Lifestyle => "Lifestyle",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Sale Type
// =============================================================================

/// Whether a sale settles at the member or standard total.
///
/// A draft without a chosen type holds `Option<SaleType>::None`; only a
/// chosen type can be committed, so persisted records always carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleType {
    Member,
    Standard,
}

impl fmt::Display for SaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleType::Member => f.write_str("member"),
            SaleType::Standard => f.write_str("standard"),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A book being assembled into a sale.
///
/// ## Item Kinds
/// - regular new book: priced through markup + FX conversion
/// - used (`is_used`): face value in AUD, no conversion or discount
/// - rental (`is_rental`): same face-value treatment as used
///
/// `is_used` and `is_rental` are mutually exclusive kinds; the
/// recommendation flag is only meaningful for regular new books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Draft-local reference (UUID v4); not persisted.
    pub id: String,

    /// Book title; must be non-empty to be sellable.
    pub title: String,

    /// Shelf category.
    pub category: Category,

    /// Display name of the manager credited with the sale.
    pub manager: String,

    /// Listed price in the book's native currency. `<= 0` means
    /// "not yet a real line item" and prices to zero.
    pub native_price: f64,

    /// Currency the listed price is denominated in.
    pub currency: Currency,

    /// Staff-pick flag; swaps the member/standard relationship.
    pub is_recommended: bool,

    /// Used-book kind: face value, no conversion.
    pub is_used: bool,

    /// Rental kind: face value, no conversion.
    pub is_rental: bool,
}

impl LineItem {
    /// Creates a blank regular new book (the UI's "+ New Book" action).
    ///
    /// Import stock is mostly Japanese, so new books default to JPY.
    pub fn new_book() -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            category: Category::default(),
            manager: String::new(),
            native_price: 0.0,
            currency: Currency::Jpy,
            is_recommended: false,
            is_used: false,
            is_rental: false,
        }
    }

    /// Creates a used book priced at face value in AUD.
    pub fn used(price: f64) -> Self {
        LineItem {
            currency: Currency::Aud,
            native_price: price,
            is_used: true,
            ..LineItem::new_book()
        }
    }

    /// Creates a rental item priced at face value in AUD.
    pub fn rental(price: f64) -> Self {
        LineItem {
            currency: Currency::Aud,
            native_price: price,
            is_rental: true,
            ..LineItem::new_book()
        }
    }

    /// Whether the item is priced at face value (used or rental).
    pub fn is_face_value(&self) -> bool {
        self.is_used || self.is_rental
    }

    /// Whether pricing this item needs the exchange-rate table.
    ///
    /// Regular new books always do: even an AUD-listed one derives its
    /// standard price through the CNY reference leg.
    pub fn needs_rates(&self) -> bool {
        !self.is_face_value() && self.native_price > 0.0
    }
}

// =============================================================================
// Book Snapshot
// =============================================================================

/// A line item frozen at commit time: original input fields plus both
/// computed prices and the price the sale actually settled at.
///
/// Field names here are the on-disk format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub title: String,
    pub category: Category,
    pub manager: String,
    pub original_price: f64,
    pub currency: Currency,
    pub is_recommend: bool,
    pub is_used: bool,
    pub is_rental: bool,
    pub member_price: f64,
    pub standard_price: f64,
    /// `member_price` or `standard_price`, per the sale's type.
    pub final_price: f64,
}

// =============================================================================
// Sale Record
// =============================================================================

/// A completed sale. Immutable once appended to the store; only the full
/// collection may be cleared wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Time-derived unique id, e.g. `20260825143015-1f3a9c2e`.
    pub id: String,

    /// Commit time.
    pub timestamp: DateTime<Utc>,

    /// Committed line-item snapshots, in draft order.
    pub books: Vec<BookSnapshot>,

    /// Member or standard settlement.
    pub sale_type: SaleType,

    pub total_member_price: f64,
    pub total_standard_price: f64,

    /// The total matching `sale_type` at commit time. Stored explicitly so
    /// historical data stays correct even if that convention later changes.
    pub actual_revenue: f64,
}

impl SaleRecord {
    /// Number of books in the sale.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

/// Generates a time-derived sale-record id with a UUID suffix for
/// uniqueness within the same second.
pub fn generate_record_id(timestamp: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", timestamp.format("%Y%m%d%H%M%S"), &suffix[..8])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
        assert_eq!("jpy".parse::<Currency>().unwrap(), Currency::Jpy);
        assert!("USD".parse::<Currency>().is_err());
    }

    #[test]
    fn test_only_aud_is_settlement() {
        assert!(Currency::Aud.is_settlement());
        assert!(!Currency::Jpy.is_settlement());
        assert!(!Currency::Cny.is_settlement());
    }

    #[test]
    fn test_used_and_rental_constructors_are_aud_face_value() {
        let used = LineItem::used(5.0);
        assert!(used.is_used && !used.is_rental);
        assert_eq!(used.currency, Currency::Aud);
        assert!(used.is_face_value());
        assert!(!used.needs_rates());

        let rental = LineItem::rental(5.0);
        assert!(rental.is_rental && !rental.is_used);
        assert!(rental.is_face_value());
    }

    #[test]
    fn test_regular_book_needs_rates_even_in_aud() {
        let mut item = LineItem::new_book();
        item.native_price = 10.0;
        item.currency = Currency::Aud;
        // The standard price still derives through the CNY reference leg.
        assert!(item.needs_rates());
    }

    #[test]
    fn test_blank_item_does_not_need_rates() {
        let item = LineItem::new_book();
        assert!(!item.needs_rates());
    }

    #[test]
    fn test_record_id_is_time_prefixed() {
        let ts = "2026-08-25T14:30:15Z".parse::<DateTime<Utc>>().unwrap();
        let id = generate_record_id(ts);
        assert!(id.starts_with("20260825143015-"));
        assert_eq!(id.len(), "20260825143015-".len() + 8);
    }

    #[test]
    fn test_persisted_field_names_are_stable() {
        let record = SaleRecord {
            id: "20260825143015-deadbeef".to_string(),
            timestamp: "2026-08-25T14:30:15Z".parse().unwrap(),
            books: vec![BookSnapshot {
                title: "Norwegian Wood".to_string(),
                category: Category::Literature,
                manager: "Kelly".to_string(),
                original_price: 1000.0,
                currency: Currency::Jpy,
                is_recommend: false,
                is_used: false,
                is_rental: false,
                member_price: 11.5,
                standard_price: 17.25,
                final_price: 11.5,
            }],
            sale_type: SaleType::Member,
            total_member_price: 11.5,
            total_standard_price: 17.25,
            actual_revenue: 11.5,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sale_type"], "member");
        assert_eq!(json["books"][0]["is_recommend"], false);
        assert_eq!(json["books"][0]["original_price"], 1000.0);
        assert_eq!(json["books"][0]["currency"], "JPY");
        assert_eq!(json["books"][0]["category"], "literature");
        assert_eq!(json["actual_revenue"], 11.5);
    }
}
