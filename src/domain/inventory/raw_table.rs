// ============================================================
// RAW TABLE TYPES
// ============================================================
// Parsed sheet contents before any normalization

use serde::{Deserialize, Serialize};

/// A single cell as read from the source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Build a cell from trimmed text, treating blank strings as empty
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Lenient numeric coercion; anything that is not a number becomes `None`
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Display string for text-typed fields (names, vendors)
    pub fn to_display(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(true) => Some("True".to_string()),
            CellValue::Bool(false) => Some("False".to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Header labels plus ordered data rows; every row has `headers.len()` cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Create a table, padding or truncating rows to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when no data row has a value in column `idx`
    pub fn is_column_empty(&self, idx: usize) -> bool {
        self.rows
            .iter()
            .all(|row| row.get(idx).map(CellValue::is_empty).unwrap_or(true))
    }

    /// Remove every column that holds no values at all
    pub fn drop_empty_columns(&mut self) -> Vec<String> {
        let keep: Vec<bool> = (0..self.width())
            .map(|idx| !self.is_column_empty(idx))
            .collect();

        let dropped = self
            .headers
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| !**keep)
            .map(|(h, _)| h.clone())
            .collect();

        self.headers = retain_by_mask(std::mem::take(&mut self.headers), &keep);
        self.rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|row| retain_by_mask(row, &keep))
            .collect();

        dropped
    }
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter(|(_, keep)| **keep)
        .map(|(item, _)| item)
        .collect()
}
