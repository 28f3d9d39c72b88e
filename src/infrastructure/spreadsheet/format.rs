use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Upload formats the report reader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Pick the format from the file name suffix (ASCII case-insensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let lower = file_name.trim().to_ascii_lowercase();

        if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lower.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else {
            Err(AppError::UnsupportedFormat(file_name.to_string()))
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
