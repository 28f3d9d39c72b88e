// ============================================================
// SPREADSHEET INFRASTRUCTURE LAYER
// ============================================================
// Turn uploaded CSV/XLSX bytes into a raw header + rows table

mod csv_reader;
mod format;
mod headers;
mod xlsx_reader;

pub use csv_reader::CsvTableReader;
pub use format::FileFormat;
pub use headers::resolve_headers;
pub use xlsx_reader::XlsxTableReader;

use crate::domain::error::{AppError, Result};
use crate::domain::inventory::{CellValue, RawTable, HEADER_SKIP_ROWS};

/// Parses an inventory report upload into a [`RawTable`]
#[derive(Debug, Clone, Copy)]
pub struct ReportParser {
    skip_rows: usize,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self {
            skip_rows: HEADER_SKIP_ROWS,
        }
    }
}

impl ReportParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch on the file name suffix and parse the bytes
    pub fn parse(&self, file_name: &str, bytes: &[u8]) -> Result<RawTable> {
        let format = FileFormat::from_file_name(file_name)?;
        self.parse_as(format, bytes)
    }

    pub fn parse_as(&self, format: FileFormat, bytes: &[u8]) -> Result<RawTable> {
        let rows = match format {
            FileFormat::Csv => CsvTableReader::new().read_rows(bytes)?,
            FileFormat::Xlsx => XlsxTableReader::new().read_rows(bytes)?,
        };

        let table = self.build_table(rows)?;

        tracing::info!(format = %format, columns = ?table.headers, "Uploaded columns");

        Ok(table)
    }

    /// Drop the title rows (blank ones count), take the next non-blank row as
    /// the header and keep the non-blank rows after it
    fn build_table(&self, rows: Vec<Vec<CellValue>>) -> Result<RawTable> {
        let mut rows = rows
            .into_iter()
            .skip(self.skip_rows)
            .filter(|row| !is_blank(row));

        let header_row = rows.next().ok_or_else(|| {
            AppError::ParseError(format!(
                "No header row found after skipping {} leading rows",
                self.skip_rows
            ))
        })?;

        let headers = resolve_headers(&header_row);
        Ok(RawTable::new(headers, rows.collect()))
    }
}

fn is_blank(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}
