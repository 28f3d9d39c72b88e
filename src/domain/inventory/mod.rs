// ============================================================
// INVENTORY DOMAIN LAYER
// ============================================================
// Stock-status categories, item records, and report shapes
// No I/O, no async

mod category;
mod item_record;
mod raw_table;
mod report;
mod report_template;

pub use category::StockCategory;
pub use item_record::{ClassifiedItem, ItemRecord};
pub use raw_table::{CellValue, RawTable};
pub use report::{CategoryCounts, ChartImages, NamedItem, StockReport};
pub use report_template::{
    CanonicalField, ColumnMapping, COLUMN_MAPPING, CRITICAL_BAND_RATIO, HEADER_SKIP_ROWS,
};
