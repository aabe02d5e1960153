//! Turns raw spreadsheet rows into feed records.

use calamine::Data;
use log::{debug, info};

use crate::error::{Result, SyncError};

use super::record::FeedRecord;

/// Header of the product code column
pub const CODE_COLUMN: &str = "Код";
/// Header of the quantity indicator column
pub const QUANTITY_COLUMN: &str = "Количество";
/// Header of the price column
pub const PRICE_COLUMN: &str = "Цена";

/// Column positions located in the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    code: usize,
    quantity: usize,
    price: usize,
}

impl ColumnMap {
    fn locate(header: &[String], row: usize) -> Result<Self> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|cell| cell.trim() == column)
                .ok_or(SyncError::MissingColumn { column, row })
        };

        Ok(Self {
            code: find(CODE_COLUMN)?,
            quantity: find(QUANTITY_COLUMN)?,
            price: find(PRICE_COLUMN)?,
        })
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|value| value.trim()).unwrap_or_default()
}

/// Builds feed records from sheet rows.
///
/// `header_row` is the 0-based index of the row holding the column names;
/// every later row with a non-empty code becomes a record. Rows without a
/// code are group headings in the distributor's export and are skipped.
pub fn records_from_rows<I>(rows: I, header_row: usize) -> Result<Vec<FeedRecord>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows = rows.into_iter().skip(header_row);
    let header = rows.next().ok_or(SyncError::MissingColumn {
        column: CODE_COLUMN,
        row: header_row,
    })?;
    let columns = ColumnMap::locate(&header, header_row)?;
    debug!("Feed columns located: {columns:?}");

    let mut records = Vec::new();
    let mut skipped = 0;
    for row in rows {
        let code = cell(&row, columns.code);
        if code.is_empty() {
            skipped += 1;
            continue;
        }
        records.push(FeedRecord::new(
            code,
            cell(&row, columns.quantity),
            cell(&row, columns.price),
        ));
    }

    info!(
        "Parsed {} feed records ({} rows without code skipped)",
        records.len(),
        skipped
    );
    Ok(records)
}

/// Renders a spreadsheet cell as the text a user sees in it.
///
/// Whole numbers drop their fraction, so a numeric code `12345.0` becomes
/// "12345" and matches the marketplace offer id.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            (*value as i64).to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sheet() -> Vec<Vec<String>> {
        vec![
            row(&["Остатки на складе"]),
            row(&[]),
            row(&["", "Наименование", "Код", "Количество", "Цена"]),
            row(&["", "CASIO"]),
            row(&["", "Casio MTP-1302", "66890", ">10", "5'990.00 руб."]),
            row(&["", "Casio G-Shock", " 78134 ", "1", "12'490.00 руб."]),
            row(&["", "Casio F-91W", "11021", "3"]),
        ]
    }

    #[test]
    fn parses_rows_after_header() {
        let records = records_from_rows(sheet(), 2).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], FeedRecord::new("66890", ">10", "5'990.00 руб."));
        assert_eq!(records[1].code, "78134");
        assert_eq!(records[2].price_text, "");
    }

    #[test]
    fn skips_rows_without_code() {
        let records = records_from_rows(sheet(), 2).unwrap();
        assert!(records.iter().all(|r| !r.code.is_empty()));
    }

    #[test]
    fn wrong_header_row_reports_missing_column() {
        match records_from_rows(sheet(), 1).unwrap_err() {
            SyncError::MissingColumn { column, row } => {
                assert_eq!(column, CODE_COLUMN);
                assert_eq!(row, 1);
            }
            other => panic!("Expected SyncError::MissingColumn, got: {other:?}"),
        }
    }

    #[test]
    fn missing_price_column_is_reported() {
        let rows = vec![row(&["Код", "Количество"]), row(&["1", "2"])];
        match records_from_rows(rows, 0).unwrap_err() {
            SyncError::MissingColumn { column, .. } => assert_eq!(column, PRICE_COLUMN),
            other => panic!("Expected SyncError::MissingColumn, got: {other:?}"),
        }
    }

    #[test]
    fn header_beyond_sheet_is_reported() {
        assert!(records_from_rows(sheet(), 40).is_err());
    }

    #[test]
    fn cell_text_renders_whole_floats_as_integers() {
        assert_eq!(cell_text(&Data::Float(12345.0)), "12345");
        assert_eq!(cell_text(&Data::Float(1.0)), "1");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }

    #[test]
    fn cell_text_keeps_strings_and_fractions() {
        assert_eq!(cell_text(&Data::String(">10".to_string())), ">10");
        assert_eq!(cell_text(&Data::Float(5990.5)), "5990.5");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
