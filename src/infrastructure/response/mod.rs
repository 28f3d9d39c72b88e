use crate::domain::inventory::{CategoryCounts, ChartImages, NamedItem, StockReport};

/// Replaces numbers JSON cannot carry (NaN, ±inf) with null, recursively.
pub trait ScrubNonFinite {
    fn scrub_non_finite(self) -> Self;
}

impl ScrubNonFinite for Option<f64> {
    fn scrub_non_finite(self) -> Self {
        self.filter(|v| v.is_finite())
    }
}

impl<T: ScrubNonFinite> ScrubNonFinite for Vec<T> {
    fn scrub_non_finite(self) -> Self {
        self.into_iter().map(ScrubNonFinite::scrub_non_finite).collect()
    }
}

// Text and counts cannot hold non-finite values.
impl ScrubNonFinite for NamedItem {
    fn scrub_non_finite(self) -> Self {
        self
    }
}

impl ScrubNonFinite for CategoryCounts {
    fn scrub_non_finite(self) -> Self {
        self
    }
}

impl ScrubNonFinite for ChartImages {
    fn scrub_non_finite(self) -> Self {
        self
    }
}

impl ScrubNonFinite for StockReport {
    fn scrub_non_finite(self) -> Self {
        StockReport {
            overstocked: self.overstocked.scrub_non_finite(),
            understocked: self.understocked.scrub_non_finite(),
            critical: self.critical.scrub_non_finite(),
            bar_labels: self.bar_labels,
            bar_values: self.bar_values.scrub_non_finite(),
            bar_colors: self.bar_colors,
            pie_labels: self.pie_labels,
            pie_values: self.pie_values,
            pie_colors: self.pie_colors,
            color_counts: self.color_counts.scrub_non_finite(),
            charts: self.charts.scrub_non_finite(),
        }
    }
}
