pub mod charts;
pub mod config;
pub mod response;
pub mod spreadsheet;
