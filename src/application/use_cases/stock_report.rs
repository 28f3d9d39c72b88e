// ============================================================
// STOCK REPORT USE CASE
// ============================================================
// Upload bytes -> classified, charted, JSON-safe report

use crate::application::use_cases::aggregator::ReportAggregator;
use crate::application::use_cases::classifier::StockClassifier;
use crate::application::use_cases::normalizer::InventoryNormalizer;
use crate::domain::error::{ErrorClass, Result};
use crate::domain::inventory::StockReport;
use crate::infrastructure::charts::ChartRenderer;
use crate::infrastructure::config::ChartConfig;
use crate::infrastructure::response::ScrubNonFinite;
use crate::infrastructure::spreadsheet::ReportParser;

pub struct StockReportUseCase {
    parser: ReportParser,
    normalizer: InventoryNormalizer,
    classifier: StockClassifier,
    aggregator: ReportAggregator,
    renderer: ChartRenderer,
}

impl Default for StockReportUseCase {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

impl StockReportUseCase {
    pub fn new(charts: ChartConfig) -> Self {
        Self {
            parser: ReportParser::new(),
            normalizer: InventoryNormalizer::default(),
            classifier: StockClassifier::new(),
            aggregator: ReportAggregator::new(),
            renderer: ChartRenderer::new(charts),
        }
    }

    /// Run the whole pipeline for one upload. Either the full report or an
    /// error comes back; nothing partial.
    pub fn execute(&self, file_name: &str, bytes: &[u8]) -> Result<StockReport> {
        let result = self.run(file_name, bytes);

        if let Err(err) = &result {
            match err.status_class() {
                ErrorClass::BadRequest => {
                    tracing::warn!(file = %file_name, error = %err, "Rejected upload")
                }
                ErrorClass::Internal => {
                    tracing::error!(file = %file_name, error = %err, "Failed to process upload")
                }
            }
        }

        result
    }

    fn run(&self, file_name: &str, bytes: &[u8]) -> Result<StockReport> {
        let table = self.parser.parse(file_name, bytes)?;
        let records = self.normalizer.normalize(table)?;
        let items = self.classifier.classify_all(records);

        let mut report = self.aggregator.aggregate(&items);
        report.charts = self.renderer.render(&report)?;

        tracing::info!(file = %file_name, items = items.len(), "Processed inventory report");

        Ok(report.scrub_non_finite())
    }
}
