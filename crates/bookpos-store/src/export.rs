//! # Export Writer
//!
//! Writes the report module's flat rows to a CSV file: one row per
//! committed book, headers from the row's field names. Which rows to
//! export (filtered or full history) is the caller's business; this
//! module only writes what it is handed.

use std::path::Path;

use tracing::info;

use bookpos_core::report::ExportRow;

use crate::error::StoreResult;

/// Writes `rows` as CSV to `path`, overwriting any existing file.
pub fn write_rows(path: impl AsRef<Path>, rows: &[ExportRow]) -> StoreResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "export written");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bookpos_core::report::export_rows;
    use bookpos_core::{BookSnapshot, Category, Currency, SaleRecord, SaleType};

    fn sample_record() -> SaleRecord {
        SaleRecord {
            id: "20260825100000-deadbeef".to_string(),
            timestamp: "2026-08-25T10:00:00Z".parse().unwrap(),
            books: vec![
                BookSnapshot {
                    title: "Kokoro".to_string(),
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
                },
                BookSnapshot {
                    title: "Old Atlas".to_string(),
                    category: Category::Other,
                    manager: "Kelly".to_string(),
                    original_price: 10.0,
                    currency: Currency::Aud,
                    is_recommend: false,
                    is_used: true,
                    is_rental: false,
                    member_price: 10.0,
                    standard_price: 10.0,
                    final_price: 10.0,
                },
            ],
            sale_type: SaleType::Member,
            total_member_price: 21.5,
            total_standard_price: 27.25,
            actual_revenue: 21.5,
        }
    }

    #[test]
    fn test_writes_one_csv_row_per_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let rows = export_rows(&[sample_record()]);
        write_rows(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // Header + two book rows.
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("sale_id,timestamp,sale_type,title"));
        assert!(lines[1].contains("Kokoro"));
        assert!(lines[1].contains("member"));
        assert!(lines[2].contains("Old Atlas"));
        assert!(lines[2].contains("true")); // is_used
    }

    #[test]
    fn test_empty_row_set_still_produces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        write_rows(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
