// ============================================================
// STOCK REPORT
// ============================================================
// Response payload built once per upload

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::StockCategory;

/// Name/vendor projection used in the per-category lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedItem {
    pub name: String,
    pub vendor: Option<String>,
}

/// Category tallies, most frequent first.
///
/// Serializes as a `{color_token: count}` map that keeps this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts(pub Vec<(StockCategory, usize)>);

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(StockCategory, usize)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in &self.0 {
            map.serialize_entry(category.color_token(), count)?;
        }
        map.end()
    }
}

/// Base64-encoded PNG renderings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartImages {
    pub bar: String,
    pub pie: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    pub overstocked: Vec<NamedItem>,
    pub understocked: Vec<NamedItem>,
    pub critical: Vec<NamedItem>,

    pub bar_labels: Vec<String>,
    pub bar_values: Vec<Option<f64>>,
    pub bar_colors: Vec<StockCategory>,

    pub pie_labels: Vec<String>,
    pub pie_values: Vec<usize>,
    pub pie_colors: Vec<StockCategory>,

    pub color_counts: CategoryCounts,
    pub charts: ChartImages,
}
