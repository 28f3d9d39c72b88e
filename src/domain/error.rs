use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    UnsupportedFormat(String),
    MissingColumn(String),
    ParseError(String),
    RenderError(String),
    ConfigError(String),
    IoError(String),
    Internal(String),
}

/// Coarse outcome class the transport layer maps to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    BadRequest,
    Internal,
}

impl AppError {
    pub fn status_class(&self) -> ErrorClass {
        match self {
            AppError::UnsupportedFormat(_) | AppError::MissingColumn(_) => ErrorClass::BadRequest,
            _ => ErrorClass::Internal,
        }
    }

    /// Message suitable for returning to the uploader.
    pub fn detail(&self) -> String {
        match self {
            AppError::UnsupportedFormat(_) => "Unsupported file format".to_string(),
            AppError::MissingColumn(field) => format!("Missing required column: '{}'", field),
            other => format!("Error processing file: {}", other),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::UnsupportedFormat(name) => write!(f, "Unsupported file format: {}", name),
            AppError::MissingColumn(field) => write!(f, "Missing required column: {}", field),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::RenderError(msg) => write!(f, "Render error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(format!("Malformed CSV: {}", err))
    }
}

impl From<calamine::XlsxError> for AppError {
    fn from(err: calamine::XlsxError) -> Self {
        AppError::ParseError(format!("Malformed XLSX: {}", err))
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::RenderError(err.to_string())
    }
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AppError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AppError::RenderError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
