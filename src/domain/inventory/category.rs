// ============================================================
// STOCK CATEGORY ENUM
// ============================================================
// Mutually exclusive stock status assigned to every item

use serde::{Deserialize, Serialize};

/// Stock status of an inventory item.
///
/// Serializes as its color token (`"red"`, `"yellow"`, ...), which is also the
/// grouping key used by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockCategory {
    /// Balance above the configured maximum
    #[serde(rename = "red")]
    Overstocked,

    /// Balance below the configured minimum
    #[serde(rename = "yellow")]
    Understocked,

    /// Balance inside the lowest quarter of the min..max band
    #[serde(rename = "orange")]
    Critical,

    /// Everything else, including items with missing thresholds
    #[serde(rename = "green")]
    Normal,
}

impl StockCategory {
    pub const ALL: [StockCategory; 4] = [
        StockCategory::Overstocked,
        StockCategory::Understocked,
        StockCategory::Critical,
        StockCategory::Normal,
    ];

    /// Color token used as the display hint and grouping key
    pub fn color_token(&self) -> &'static str {
        match self {
            StockCategory::Overstocked => "red",
            StockCategory::Understocked => "yellow",
            StockCategory::Critical => "orange",
            StockCategory::Normal => "green",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StockCategory::Overstocked => "Overstocked",
            StockCategory::Understocked => "Understocked",
            StockCategory::Critical => "Critical",
            StockCategory::Normal => "Normal",
        }
    }

    /// RGB fill used when rendering charts
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            StockCategory::Overstocked => [255, 0, 0],
            StockCategory::Understocked => [255, 255, 0],
            StockCategory::Critical => [255, 165, 0],
            StockCategory::Normal => [0, 128, 0],
        }
    }
}

impl std::fmt::Display for StockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
