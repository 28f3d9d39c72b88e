// ============================================================
// CSV READER
// ============================================================
// Decode uploaded CSV bytes into raw cell rows

use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::domain::error::{AppError, Result};
use crate::domain::inventory::CellValue;

/// Strings treated as a missing value rather than text
static MISSING_MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

/// CSV reader for inventory uploads
#[derive(Debug, Default)]
pub struct CsvTableReader;

impl CsvTableReader {
    pub fn new() -> Self {
        Self
    }

    /// One row per physical line, title rows included. Blank lines come back
    /// as empty rows so row positions match the file.
    pub fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<CellValue>>> {
        let content = decode(bytes);
        let raw = content.as_bytes();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true) // Title rows rarely match the table width
            .from_reader(raw);

        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut record = StringRecord::new();

        loop {
            let start = reader.position().byte() as usize;

            let more = reader.read_record(&mut record).map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", rows.len() + 1, e))
            })?;
            if !more {
                break;
            }

            // The csv reader passes over empty lines without yielding a record
            rows.extend((0..blank_lines_at(raw, start)).map(|_| Vec::new()));

            if record.len() == 1 && record[0].is_empty() {
                rows.push(Vec::new());
            } else {
                rows.push(record.iter().map(to_cell).collect());
            }
        }

        Ok(rows)
    }
}

/// Number of empty lines starting at byte `start`
fn blank_lines_at(raw: &[u8], start: usize) -> usize {
    let mut i = start;

    // Second half of a CRLF terminator left over from the previous record
    if i > 0 && raw.get(i - 1) == Some(&b'\r') && raw.get(i) == Some(&b'\n') {
        i += 1;
    }

    let mut count = 0;
    while let Some(&byte) = raw.get(i) {
        match byte {
            b'\n' => i += 1,
            b'\r' => {
                i += 1;
                if raw.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => break,
        }
        count += 1;
    }
    count
}

/// UTF-8 (with or without BOM) first, Windows-1252 as the fallback
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (content, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return content;
    }

    tracing::warn!("CSV upload is not valid UTF-8, decoding as Windows-1252");
    let (content, _, _) = WINDOWS_1252.decode(bytes);
    content
}

fn to_cell(field: &str) -> CellValue {
    if MISSING_MARKERS.contains(field.trim()) {
        CellValue::Empty
    } else {
        CellValue::from_text(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_read_simple_rows() {
        let content = "Stock report,,\nPrinted today,,\nMaterial name,Min,Max\nBolt,1,2";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec![text("Stock report"), CellValue::Empty, CellValue::Empty]);
        assert_eq!(rows[3], vec![text("Bolt"), text("1"), text("2")]);
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let content = "Title\nMaterial name,Min,Max\nBolt";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[2].len(), 1);
    }

    #[test]
    fn test_missing_markers_become_empty() {
        let content = "a,b,c,d\nNA,n/a,#N/A,null";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert!(rows[1].iter().all(CellValue::is_empty));
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let content = "name,vendor\n\"Bolt, M8\",\"Acme, Inc.\"";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert_eq!(rows[1], vec![text("Bolt, M8"), text("Acme, Inc.")]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Material name,Min\n");
        let rows = CsvTableReader::new().read_rows(&bytes).unwrap();

        assert_eq!(rows[0][0], text("Material name"));
    }

    #[test]
    fn test_latin1_fallback() {
        // "Café" in Windows-1252
        let bytes = b"name\nCaf\xe9";
        let rows = CsvTableReader::new().read_rows(bytes).unwrap();

        assert_eq!(rows[1][0], text("Café"));
    }

    #[test]
    fn test_blank_lines_are_kept_as_empty_rows() {
        let content = "Title\n\nMaterial name\nBolt\n";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2][0], text("Material name"));
    }

    #[test]
    fn test_blank_lines_with_crlf_terminators() {
        let content = "Title\r\n\r\n\r\nMaterial name\r\nBolt\r\n";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert_eq!(rows.len(), 5);
        assert!(rows[1].is_empty() && rows[2].is_empty());
        assert_eq!(rows[3][0], text("Material name"));
        assert_eq!(rows[4][0], text("Bolt"));
    }

    #[test]
    fn test_leading_blank_line_counts() {
        let content = "\nTitle\nMaterial name";
        let rows = CsvTableReader::new().read_rows(content.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[2][0], text("Material name"));
    }
}
