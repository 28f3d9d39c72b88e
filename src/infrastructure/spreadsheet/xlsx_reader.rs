use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::domain::error::{AppError, Result};
use crate::domain::inventory::CellValue;

/// Reads the first worksheet of an uploaded workbook
#[derive(Debug, Default)]
pub struct XlsxTableReader;

impl XlsxTableReader {
    pub fn new() -> Self {
        Self
    }

    /// Rows of the first worksheet, numbered from the top of the sheet
    pub fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<CellValue>>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
            .map_err(|e| AppError::ParseError(format!("Failed to open Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
            .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {}", e)))?;

        Ok(sheet_rows(&range))
    }
}

/// The range starts at the first used cell; leading blank rows and columns are
/// restored so row positions match what the user sees in the sheet.
fn sheet_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(to_cell)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect()
}

fn to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) => CellValue::Number(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::from_text(s),
        other => CellValue::from_text(&other.to_string()),
    }
}
