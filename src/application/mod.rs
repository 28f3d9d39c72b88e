pub mod use_cases;

pub use use_cases::aggregator::ReportAggregator;
pub use use_cases::classifier::StockClassifier;
pub use use_cases::normalizer::InventoryNormalizer;
pub use use_cases::stock_report::StockReportUseCase;
