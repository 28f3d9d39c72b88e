// ============================================================
// REPORT AGGREGATOR
// ============================================================
// Partition classified items and tally categories for the charts

use crate::domain::inventory::{
    CategoryCounts, ChartImages, ClassifiedItem, NamedItem, StockCategory, StockReport,
};

#[derive(Debug, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Build every report field except the chart images
    pub fn aggregate(&self, items: &[ClassifiedItem]) -> StockReport {
        let counts = count_categories(items);

        tracing::info!(
            distribution = ?counts.iter().map(|(c, n)| (c.color_token(), *n)).collect::<Vec<_>>(),
            "Color distribution"
        );

        StockReport {
            overstocked: named_items(items, StockCategory::Overstocked),
            understocked: named_items(items, StockCategory::Understocked),
            critical: named_items(items, StockCategory::Critical),

            bar_labels: items.iter().map(|item| item.record.name.clone()).collect(),
            bar_values: items.iter().map(|item| item.record.balance_qty).collect(),
            bar_colors: items.iter().map(|item| item.category).collect(),

            pie_labels: counts.iter().map(|(c, _)| c.label().to_string()).collect(),
            pie_values: counts.iter().map(|(_, n)| *n).collect(),
            pie_colors: counts.iter().map(|(c, _)| *c).collect(),

            color_counts: counts,
            charts: ChartImages::default(),
        }
    }
}

fn named_items(items: &[ClassifiedItem], category: StockCategory) -> Vec<NamedItem> {
    items
        .iter()
        .filter(|item| item.category == category)
        .map(|item| NamedItem {
            name: item.record.name.clone(),
            vendor: item.record.vendor.clone(),
        })
        .collect()
}

/// Counts per present category, descending; ties keep first-appearance order
fn count_categories(items: &[ClassifiedItem]) -> CategoryCounts {
    let mut counts: Vec<(StockCategory, usize)> = Vec::new();

    for item in items {
        match counts.iter_mut().find(|(c, _)| *c == item.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.category, 1)),
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    CategoryCounts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::ItemRecord;

    fn item(name: &str, vendor: Option<&str>, qty: Option<f64>, category: StockCategory) -> ClassifiedItem {
        let mut record = ItemRecord::new(name).with_levels(qty, Some(10.0), Some(20.0));
        record.vendor = vendor.map(str::to_string);
        ClassifiedItem { record, category }
    }

    fn sample() -> Vec<ClassifiedItem> {
        vec![
            item("Widget", Some("Acme"), Some(5.0), StockCategory::Understocked),
            item("Gadget", Some("Globex"), Some(25.0), StockCategory::Overstocked),
            item("Sprocket", None, Some(11.0), StockCategory::Critical),
            item("Bolt", Some("Acme"), Some(15.0), StockCategory::Normal),
            item("Nut", Some("Acme"), None, StockCategory::Normal),
        ]
    }

    #[test]
    fn test_lists_are_projected_per_category() {
        let report = ReportAggregator::new().aggregate(&sample());

        assert_eq!(
            report.understocked,
            vec![NamedItem { name: "Widget".into(), vendor: Some("Acme".into()) }]
        );
        assert_eq!(report.overstocked[0].name, "Gadget");
        assert_eq!(report.critical, vec![NamedItem { name: "Sprocket".into(), vendor: None }]);
    }

    #[test]
    fn test_bar_arrays_are_parallel_and_ordered() {
        let report = ReportAggregator::new().aggregate(&sample());

        assert_eq!(report.bar_labels, vec!["Widget", "Gadget", "Sprocket", "Bolt", "Nut"]);
        assert_eq!(
            report.bar_values,
            vec![Some(5.0), Some(25.0), Some(11.0), Some(15.0), None]
        );
        assert_eq!(report.bar_colors[1], StockCategory::Overstocked);
        assert_eq!(report.bar_colors.len(), report.bar_labels.len());
    }

    #[test]
    fn test_pie_order_is_by_descending_count_then_first_seen() {
        let report = ReportAggregator::new().aggregate(&sample());

        assert_eq!(report.pie_labels, vec!["Normal", "Understocked", "Overstocked", "Critical"]);
        assert_eq!(report.pie_values, vec![2, 1, 1, 1]);
        assert_eq!(
            report.pie_colors,
            vec![
                StockCategory::Normal,
                StockCategory::Understocked,
                StockCategory::Overstocked,
                StockCategory::Critical
            ]
        );
    }

    #[test]
    fn test_counts_sum_to_item_count() {
        let items = sample();
        let report = ReportAggregator::new().aggregate(&items);

        assert_eq!(report.color_counts.total(), items.len());
        let normal = report.pie_colors.iter().position(|c| *c == StockCategory::Normal);
        assert_eq!(normal.map(|i| report.pie_values[i]), Some(2));
    }

    #[test]
    fn test_absent_categories_are_not_listed() {
        let items = vec![item("Bolt", None, Some(15.0), StockCategory::Normal)];
        let report = ReportAggregator::new().aggregate(&items);

        assert_eq!(report.pie_labels, vec!["Normal"]);
        assert_eq!(
            serde_json::to_value(&report.color_counts).unwrap(),
            serde_json::json!({ "green": 1 })
        );
    }

    #[test]
    fn test_empty_input() {
        let report = ReportAggregator::new().aggregate(&[]);

        assert!(report.bar_labels.is_empty());
        assert!(report.color_counts.is_empty());
    }
}
