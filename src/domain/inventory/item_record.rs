use serde::{Deserialize, Serialize};

use super::StockCategory;

/// One normalized inventory row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub vendor: Option<String>,
    pub balance_qty: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vendor: None,
            balance_qty: None,
            min: None,
            max: None,
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn with_levels(mut self, balance_qty: Option<f64>, min: Option<f64>, max: Option<f64>) -> Self {
        self.balance_qty = balance_qty;
        self.min = min;
        self.max = max;
        self
    }
}

/// An item record paired with the category the classifier assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedItem {
    pub record: ItemRecord,
    pub category: StockCategory,
}
