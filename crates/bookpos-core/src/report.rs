//! # Reporting & Aggregation
//!
//! Pure read-side operations over committed sale records. Storage hands in
//! a slice; nothing here touches a file.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.list_all()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter(records, ReportFilter, now)   sale type / text / date range     │
//! │       │                                                                 │
//! │       ├──► aggregate(..) ──► SalesSummary   (counts, revenue, splits)   │
//! │       │                                                                 │
//! │       └──► export_rows(..) ──► Vec<ExportRow>   (one row per book)      │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                            bookpos-store::export (CSV writer)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use crate::types::{Category, SaleRecord, SaleType};

// =============================================================================
// Filters
// =============================================================================

/// Time window computed against each record's timestamp date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    /// Timestamp date within 7 days (inclusive) of `now`.
    Last7Days,
    /// Timestamp date within 30 days (inclusive) of `now`.
    Last30Days,
    /// Same calendar year and month as `now`.
    ThisMonth,
}

impl DateRange {
    fn matches(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Last7Days => timestamp.date_naive() >= now.date_naive() - Duration::days(7),
            DateRange::Last30Days => {
                timestamp.date_naive() >= now.date_naive() - Duration::days(30)
            }
            DateRange::ThisMonth => {
                timestamp.year() == now.year() && timestamp.month() == now.month()
            }
        }
    }
}

/// Criteria for narrowing a record set. All criteria are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Keep only sales of this type.
    pub sale_type: Option<SaleType>,

    /// Case-insensitive match against any book's title or manager.
    pub text_query: Option<String>,

    /// Time window against the record timestamp.
    pub date_range: DateRange,
}

/// Returns the records matching every criterion, preserving input order.
///
/// `now` is passed in rather than read from the clock so date windows are
/// testable; callers hand in `Utc::now()`.
pub fn filter<'a>(
    records: &'a [SaleRecord],
    criteria: &ReportFilter,
    now: DateTime<Utc>,
) -> Vec<&'a SaleRecord> {
    let query = criteria
        .text_query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    records
        .iter()
        .filter(|record| {
            if let Some(sale_type) = criteria.sale_type {
                if record.sale_type != sale_type {
                    return false;
                }
            }
            if !criteria.date_range.matches(record.timestamp, now) {
                return false;
            }
            if let Some(query) = &query {
                let hit = record.books.iter().any(|book| {
                    book.title.to_lowercase().contains(query)
                        || book.manager.to_lowercase().contains(query)
                });
                if !hit {
                    return false;
                }
            }
            true
        })
        .collect()
}

// =============================================================================
// Aggregation
// =============================================================================

/// Orders/books/revenue for one slice of the record set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SliceStats {
    pub orders: usize,
    pub books: usize,
    pub revenue: f64,
}

/// Per-category totals. Revenue is the sum of the books' final prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub books: usize,
    pub revenue: f64,
}

/// Per-manager totals, attributed per book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerStat {
    pub manager: String,
    pub books: usize,
    pub revenue: f64,
}

/// Statistics derived from a record sequence.
///
/// Deterministic for a given input order: category and manager splits are
/// built in first-appearance order, and the manager ranking uses a stable
/// sort so ties keep that order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SalesSummary {
    /// Total committed sales.
    pub order_count: usize,

    /// Total books across all sales.
    pub book_count: usize,

    /// Sum of every record's `actual_revenue`.
    pub total_revenue: f64,

    pub member: SliceStats,
    pub standard: SliceStats,

    /// Split by category, first-appearance order.
    pub by_category: Vec<CategoryStat>,

    /// Split by manager, ranked by book count descending.
    pub by_manager: Vec<ManagerStat>,
}

impl SalesSummary {
    /// The `n` managers with the most books sold.
    pub fn top_managers(&self, n: usize) -> &[ManagerStat] {
        &self.by_manager[..self.by_manager.len().min(n)]
    }
}

/// Derives summary statistics from a record sequence.
///
/// Idempotent: the same unchanged sequence yields identical statistics.
pub fn aggregate(records: &[SaleRecord]) -> SalesSummary {
    let mut summary = SalesSummary::default();

    for record in records {
        summary.order_count += 1;
        summary.book_count += record.books.len();
        summary.total_revenue += record.actual_revenue;

        let slice = match record.sale_type {
            SaleType::Member => &mut summary.member,
            SaleType::Standard => &mut summary.standard,
        };
        slice.orders += 1;
        slice.books += record.books.len();
        slice.revenue += record.actual_revenue;

        for book in &record.books {
            match summary
                .by_category
                .iter_mut()
                .find(|stat| stat.category == book.category)
            {
                Some(stat) => {
                    stat.books += 1;
                    stat.revenue += book.final_price;
                }
                None => summary.by_category.push(CategoryStat {
                    category: book.category,
                    books: 1,
                    revenue: book.final_price,
                }),
            }

            match summary
                .by_manager
                .iter_mut()
                .find(|stat| stat.manager == book.manager)
            {
                Some(stat) => {
                    stat.books += 1;
                    stat.revenue += book.final_price;
                }
                None => summary.by_manager.push(ManagerStat {
                    manager: book.manager.clone(),
                    books: 1,
                    revenue: book.final_price,
                }),
            }
        }
    }

    // Stable sort keeps first-appearance order for tied counts.
    summary.by_manager.sort_by(|a, b| b.books.cmp(&a.books));
    summary
}

// =============================================================================
// Export
// =============================================================================

/// One flat row per committed book, for the external file-writing
/// collaborator. Carries every original and computed field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub sale_id: String,
    pub timestamp: DateTime<Utc>,
    pub sale_type: SaleType,
    pub title: String,
    pub category: Category,
    pub manager: String,
    pub original_price: f64,
    pub currency: String,
    pub is_recommend: bool,
    pub is_used: bool,
    pub is_rental: bool,
    pub member_price: f64,
    pub standard_price: f64,
    pub final_price: f64,
}

/// Flattens records into one row per book, preserving record order.
pub fn export_rows(records: &[SaleRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .flat_map(|record| {
            record.books.iter().map(|book| ExportRow {
                sale_id: record.id.clone(),
                timestamp: record.timestamp,
                sale_type: record.sale_type,
                title: book.title.clone(),
                category: book.category,
                manager: book.manager.clone(),
                original_price: book.original_price,
                currency: book.currency.code().to_string(),
                is_recommend: book.is_recommend,
                is_used: book.is_used,
                is_rental: book.is_rental,
                member_price: book.member_price,
                standard_price: book.standard_price,
                final_price: book.final_price,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BookSnapshot, Currency};

    fn book(title: &str, manager: &str, category: Category, final_price: f64) -> BookSnapshot {
        BookSnapshot {
            title: title.to_string(),
            category,
            manager: manager.to_string(),
            original_price: final_price,
            currency: Currency::Aud,
            is_recommend: false,
            is_used: false,
            is_rental: false,
            member_price: final_price,
            standard_price: final_price * 1.5,
            final_price,
        }
    }

    fn record(
        id: &str,
        timestamp: &str,
        sale_type: SaleType,
        books: Vec<BookSnapshot>,
    ) -> SaleRecord {
        let revenue: f64 = books.iter().map(|b| b.final_price).sum();
        SaleRecord {
            id: id.to_string(),
            timestamp: timestamp.parse().unwrap(),
            books,
            sale_type,
            total_member_price: revenue,
            total_standard_price: revenue * 1.5,
            actual_revenue: revenue,
        }
    }

    fn fixtures() -> Vec<SaleRecord> {
        vec![
            record(
                "a",
                "2026-08-24T10:00:00Z",
                SaleType::Member,
                vec![
                    book("Kokoro", "Kelly", Category::Literature, 11.5),
                    book("Sapiens", "Kelly", Category::History, 20.0),
                ],
            ),
            record(
                "b",
                "2026-08-01T10:00:00Z",
                SaleType::Standard,
                vec![book("Botchan", "Mei", Category::Literature, 9.0)],
            ),
            record(
                "c",
                "2026-06-30T10:00:00Z",
                SaleType::Member,
                vec![book("Cosmos", "Mei", Category::Science, 15.0)],
            ),
        ]
    }

    fn now() -> DateTime<Utc> {
        "2026-08-25T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_filter_by_sale_type() {
        let records = fixtures();
        let criteria = ReportFilter {
            sale_type: Some(SaleType::Standard),
            ..ReportFilter::default()
        };
        let hits = filter(&records, &criteria, now());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn test_filter_text_matches_title_and_manager_case_insensitively() {
        let records = fixtures();

        let by_title = ReportFilter {
            text_query: Some("kokoro".to_string()),
            ..ReportFilter::default()
        };
        assert_eq!(filter(&records, &by_title, now()).len(), 1);

        let by_manager = ReportFilter {
            text_query: Some("MEI".to_string()),
            ..ReportFilter::default()
        };
        assert_eq!(filter(&records, &by_manager, now()).len(), 2);

        // Blank queries match everything.
        let blank = ReportFilter {
            text_query: Some("   ".to_string()),
            ..ReportFilter::default()
        };
        assert_eq!(filter(&records, &blank, now()).len(), 3);
    }

    #[test]
    fn test_filter_last_7_days_is_inclusive_on_the_boundary() {
        let records = vec![
            record("edge", "2026-08-18T23:59:00Z", SaleType::Member, vec![]),
            record("out", "2026-08-17T00:00:00Z", SaleType::Member, vec![]),
            record("in", "2026-08-25T00:00:00Z", SaleType::Member, vec![]),
        ];
        let criteria = ReportFilter {
            date_range: DateRange::Last7Days,
            ..ReportFilter::default()
        };
        let hits = filter(&records, &criteria, now());
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["edge", "in"]);
    }

    #[test]
    fn test_filter_this_calendar_month() {
        let records = fixtures();
        let criteria = ReportFilter {
            date_range: DateRange::ThisMonth,
            ..ReportFilter::default()
        };
        let ids: Vec<&str> = filter(&records, &criteria, now())
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_last_30_days() {
        let records = fixtures();
        let criteria = ReportFilter {
            date_range: DateRange::Last30Days,
            ..ReportFilter::default()
        };
        let ids: Vec<&str> = filter(&records, &criteria, now())
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_aggregate_counts_and_revenue() {
        let summary = aggregate(&fixtures());
        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.book_count, 4);
        assert!((summary.total_revenue - 55.5).abs() < 1e-9);

        assert_eq!(summary.member.orders, 2);
        assert_eq!(summary.member.books, 3);
        assert!((summary.member.revenue - 46.5).abs() < 1e-9);
        assert_eq!(summary.standard.orders, 1);
        assert!((summary.standard.revenue - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_splits_by_category_in_first_appearance_order() {
        let summary = aggregate(&fixtures());
        let categories: Vec<Category> = summary.by_category.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Literature,
                Category::History,
                Category::Science
            ]
        );
        assert_eq!(summary.by_category[0].books, 2);
        assert!((summary.by_category[0].revenue - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_ranks_managers_by_books_with_stable_ties() {
        let summary = aggregate(&fixtures());
        assert_eq!(summary.by_manager[0].manager, "Kelly");
        assert_eq!(summary.by_manager[0].books, 2);
        assert_eq!(summary.by_manager[1].manager, "Mei");
        assert_eq!(summary.top_managers(1).len(), 1);
        assert_eq!(summary.top_managers(10).len(), 2);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = fixtures();
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn test_aggregate_of_empty_is_zeroed() {
        let summary = aggregate(&[]);
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert!(summary.by_manager.is_empty());
    }

    #[test]
    fn test_export_flattens_one_row_per_book() {
        let rows = export_rows(&fixtures());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].sale_id, "a");
        assert_eq!(rows[0].title, "Kokoro");
        assert_eq!(rows[1].sale_id, "a");
        assert_eq!(rows[2].sale_id, "b");
        assert_eq!(rows[0].currency, "AUD");
        assert_eq!(rows[0].final_price, 11.5);
    }
}
