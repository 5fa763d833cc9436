//! First-sheet decoding
//!
//! Turns workbook bytes into row objects keyed by the header row, the shape
//! a "sheet to JSON" conversion produces:
//!
//! - The first row of the used range is the header row.
//! - Empty and error cells are left out of the row object.
//! - Rows with no remaining cells are skipped.
//! - Blank headers become `__EMPTY`, `__EMPTY_1`, ...; repeated headers get
//!   `_1`, `_2`, ... suffixes.
//! - Date cells keep their Excel serial number.

use crate::cell::CellValue;
use crate::error::Result;
use crate::RawRow;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::collections::HashMap;
use std::io::Cursor;

/// Convert calamine Data to CellValue. `None` means the cell is left out.
fn data_to_cell_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::Int(i) => Some(CellValue::Int(*i)),
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::String(s) => Some(CellValue::String(s.clone())),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => Some(CellValue::Float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::String(s.clone())),
    }
}

/// Decode the first worksheet of an `.xlsx`/`.xls` workbook held in memory.
///
/// The container format is detected from the bytes, not from any file name.
///
/// # Errors
///
/// Returns [`crate::SheetError::Decode`] if the bytes are not a readable workbook.
pub fn decode_first_sheet(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        tracing::debug!("workbook has no sheets");
        return Ok(Vec::new());
    };

    let rows = range_to_rows(&range?);
    tracing::debug!(rows = rows.len(), "decoded first sheet");
    Ok(rows)
}

/// Convert a cell range into header-keyed row objects.
pub fn range_to_rows(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers = header_names(header_row);

    rows.filter_map(|row| {
        let record: RawRow = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(name, data)| data_to_cell_value(data).map(|v| (name.clone(), v)))
            .collect();
        (!record.is_empty()).then_some(record)
    })
    .collect()
}

/// Build unique column names from the header row.
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(header_row.len());

    for data in header_row {
        let base = match data_to_cell_value(data) {
            Some(value) if !value.as_str().is_empty() => value.as_str(),
            _ => "__EMPTY".to_string(),
        };

        let name = match seen.get(&base).copied() {
            None => {
                seen.insert(base.clone(), 1);
                base
            }
            Some(mut counter) => {
                let mut candidate = format!("{base}_{counter}");
                while seen.contains_key(&candidate) {
                    counter += 1;
                    candidate = format!("{base}_{counter}");
                }
                seen.insert(base, counter + 1);
                seen.insert(candidate.clone(), 1);
                candidate
            }
        };
        names.push(name);
    }

    names
}
