// ============================================================
// INVENTORY NORMALIZER
// ============================================================
// Raw table -> item records: drop empty columns, rename, coerce

use crate::domain::error::{AppError, Result};
use crate::domain::inventory::{
    CanonicalField, CellValue, ColumnMapping, ItemRecord, RawTable, COLUMN_MAPPING,
};

/// Column positions of the canonical fields in a renamed table
#[derive(Debug, Clone, Copy)]
struct FieldColumns {
    name: usize,
    vendor: usize,
    balance_qty: usize,
    min: usize,
    max: usize,
}

pub struct InventoryNormalizer {
    mapping: ColumnMapping,
}

impl Default for InventoryNormalizer {
    fn default() -> Self {
        Self::new(COLUMN_MAPPING)
    }
}

impl InventoryNormalizer {
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    pub fn normalize(&self, mut table: RawTable) -> Result<Vec<ItemRecord>> {
        let dropped = table.drop_empty_columns();
        if !dropped.is_empty() {
            tracing::debug!(columns = ?dropped, "Dropped empty columns");
        }

        let renamed: Vec<&str> = table
            .headers
            .iter()
            .map(|label| self.mapping.rename(label))
            .collect();

        // Same order as CanonicalField::REQUIRED: name, the levels, then vendor
        let columns = FieldColumns {
            name: locate(&renamed, CanonicalField::Name)?,
            balance_qty: locate(&renamed, CanonicalField::BalanceQty)?,
            min: locate(&renamed, CanonicalField::Min)?,
            max: locate(&renamed, CanonicalField::Max)?,
            vendor: locate(&renamed, CanonicalField::Vendor)?,
        };

        let total = table.len();
        let records: Vec<ItemRecord> = table
            .rows
            .iter()
            .filter_map(|row| to_record(row, columns))
            .collect();

        if records.len() < total {
            tracing::debug!(
                dropped = total - records.len(),
                kept = records.len(),
                "Dropped rows without a material name"
            );
        }

        Ok(records)
    }
}

fn locate(renamed: &[&str], field: CanonicalField) -> Result<usize> {
    renamed
        .iter()
        .position(|label| *label == field.as_str())
        .ok_or_else(|| AppError::MissingColumn(field.as_str().to_string()))
}

fn to_record(row: &[CellValue], columns: FieldColumns) -> Option<ItemRecord> {
    let name = row[columns.name].to_display()?;

    Some(ItemRecord {
        name,
        vendor: row[columns.vendor].to_display(),
        balance_qty: row[columns.balance_qty].to_number(),
        min: row[columns.min].to_number(),
        max: row[columns.max].to_number(),
    })
}
