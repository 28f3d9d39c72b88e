// ============================================================
// REPORT TEMPLATE
// ============================================================
// Fixed structural assumptions about the uploaded inventory report

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Title/metadata rows at the top of the report that precede the header row
pub const HEADER_SKIP_ROWS: usize = 2;

/// Width of the critical band above `min`, as a fraction of `max - min`
pub const CRITICAL_BAND_RATIO: f64 = 0.25;

/// Field names the pipeline works with after renaming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Name,
    Vendor,
    BalanceQty,
    Min,
    Max,
}

impl CanonicalField {
    /// Every field must be present in the upload, checked in this order
    pub const REQUIRED: [CanonicalField; 5] = [
        CanonicalField::Name,
        CanonicalField::BalanceQty,
        CanonicalField::Min,
        CanonicalField::Max,
        CanonicalField::Vendor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Vendor => "vendor",
            CanonicalField::BalanceQty => "balance_qty",
            CanonicalField::Min => "min",
            CanonicalField::Max => "max",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source header label to canonical field table
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapping {
    entries: &'static [(&'static str, CanonicalField)],
}

pub const COLUMN_MAPPING: ColumnMapping = ColumnMapping::new(&[
    ("Material name", CanonicalField::Name),
    ("Vendor name", CanonicalField::Vendor),
    ("Balance qty", CanonicalField::BalanceQty),
    ("Min", CanonicalField::Min),
    ("Max", CanonicalField::Max),
]);

impl ColumnMapping {
    pub const fn new(entries: &'static [(&'static str, CanonicalField)]) -> Self {
        Self { entries }
    }

    /// Canonical name for a source label, or the label unchanged
    pub fn rename<'a>(&self, label: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(source, _)| *source == label)
            .map(|(_, field)| field.as_str())
            .unwrap_or(label)
    }

    /// Checks that every required field is produced by some entry
    pub fn validate(&self) -> Result<()> {
        for field in CanonicalField::REQUIRED {
            if !self.entries.iter().any(|(_, target)| *target == field) {
                return Err(AppError::ConfigError(format!(
                    "column mapping has no source label for required field '{}'",
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_known_labels() {
        assert_eq!(COLUMN_MAPPING.rename("Material name"), "name");
        assert_eq!(COLUMN_MAPPING.rename("Balance qty"), "balance_qty");
        assert_eq!(COLUMN_MAPPING.rename("Min"), "min");
    }

    #[test]
    fn test_rename_is_exact_match() {
        assert_eq!(COLUMN_MAPPING.rename("min"), "min");
        assert_eq!(COLUMN_MAPPING.rename("MIN"), "MIN");
        assert_eq!(COLUMN_MAPPING.rename("Location"), "Location");
    }

    #[test]
    fn test_default_mapping_is_valid() {
        assert!(COLUMN_MAPPING.validate().is_ok());
    }

    #[test]
    fn test_mapping_without_max_is_rejected() {
        const PARTIAL: ColumnMapping = ColumnMapping::new(&[
            ("Material name", CanonicalField::Name),
            ("Vendor name", CanonicalField::Vendor),
            ("Balance qty", CanonicalField::BalanceQty),
            ("Min", CanonicalField::Min),
        ]);

        let err = PARTIAL.validate().unwrap_err();
        assert!(err.to_string().contains("'max'"));
    }
}
