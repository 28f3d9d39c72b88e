// ============================================================
// STOCK CLASSIFIER
// ============================================================
// Threshold rules, evaluated in priority order; first match wins

use crate::domain::inventory::{ClassifiedItem, ItemRecord, StockCategory, CRITICAL_BAND_RATIO};

/// Category for one set of stock levels.
///
/// A missing (or NaN) operand makes every comparison that uses it false, so
/// such items end up `Normal` unless a rule on the defined operands fires.
pub fn classify(balance_qty: Option<f64>, min: Option<f64>, max: Option<f64>) -> StockCategory {
    let balance = balance_qty.filter(|v| !v.is_nan());
    let min = min.filter(|v| !v.is_nan());
    let max = max.filter(|v| !v.is_nan());

    let Some(balance) = balance else {
        return StockCategory::Normal;
    };

    if max.is_some_and(|max| balance > max) {
        return StockCategory::Overstocked;
    }

    if min.is_some_and(|min| balance < min) {
        return StockCategory::Understocked;
    }

    if let (Some(min), Some(max)) = (min, max) {
        let critical_ceiling = min + CRITICAL_BAND_RATIO * (max - min);
        if min <= balance && balance < critical_ceiling {
            return StockCategory::Critical;
        }
    }

    StockCategory::Normal
}

#[derive(Debug, Default)]
pub struct StockClassifier;

impl StockClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_record(&self, record: &ItemRecord) -> StockCategory {
        classify(record.balance_qty, record.min, record.max)
    }

    /// Attach a category to every record, preserving order
    pub fn classify_all(&self, records: Vec<ItemRecord>) -> Vec<ClassifiedItem> {
        records
            .into_iter()
            .map(|record| {
                let category = self.classify_record(&record);
                ClassifiedItem { record, category }
            })
            .collect()
    }
}
